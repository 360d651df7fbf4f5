//! `@[name](id)` mentions inside comment text.
//!
//! A mention is `@[` + display name + `](` + profile id + `)`. The id may
//! use either case. Anything that does not match exactly is ordinary text,
//! so a half-typed or hand-written mention never fails parsing.

use crate::identity::domain::{Profile, ProfileId};
use uuid::Uuid;

/// Maximum distance, in characters, between the `@` and the cursor for
/// [`mention_query`] to report a query.
pub const MENTION_QUERY_SPAN: usize = 50;

const OPEN: &str = "@[";

/// A parsed mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// Name as written in the text; may be stale after a rename.
    pub display_name: String,
    /// Mentioned profile.
    pub profile_id: ProfileId,
}

enum Segment<'a> {
    Text(&'a str),
    Mention(Mention),
}

fn scan<'a>(text: &'a str, mut visit: impl FnMut(Segment<'a>)) {
    let mut rest = text;
    while let Some((before, after)) = rest.split_once(OPEN) {
        visit(Segment::Text(before));
        let (segment, next) = parse_body(after).map_or((Segment::Text(OPEN), after), |(mention, tail)| {
            (Segment::Mention(mention), tail)
        });
        visit(segment);
        rest = next;
    }
    visit(Segment::Text(rest));
}

/// Parses `name](id)` following an `@[`.
fn parse_body(after_open: &str) -> Option<(Mention, &str)> {
    let (name, rest) = after_open.split_once(']')?;
    if name.is_empty() {
        return None;
    }
    let (raw_id, tail) = rest.strip_prefix('(')?.split_once(')')?;
    let id = Uuid::parse_str(raw_id).ok()?;
    Some((
        Mention {
            display_name: name.to_owned(),
            profile_id: ProfileId::from_uuid(id),
        },
        tail,
    ))
}

/// Returns the mentions in `text`, in order of appearance.
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<Mention> {
    let mut mentions = Vec::new();
    scan(text, |segment| {
        if let Segment::Mention(mention) = segment {
            mentions.push(mention);
        }
    });
    mentions
}

/// Rewrites every mention with `render`, copying the text around them
/// unchanged.
pub fn render_mentions(text: &str, mut render: impl FnMut(&Mention) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    scan(text, |segment| match segment {
        Segment::Text(plain) => out.push_str(plain),
        Segment::Mention(mention) => out.push_str(&render(&mention)),
    });
    out
}

/// Encodes a mention of `profile`.
///
/// `]` cannot appear inside the name of a mention and is dropped.
#[must_use]
pub fn encode_mention(profile: &Profile) -> String {
    let name: String = profile
        .display_name()
        .chars()
        .filter(|ch| *ch != ']')
        .collect();
    format!("@[{name}]({})", profile.id())
}

/// Returns the partial name typed after the last `@` before `cursor`.
///
/// `cursor` counts characters. Returns `None` when there is no unescaped
/// `@` (one not preceded by `\`), when the `@` lies more than
/// [`MENTION_QUERY_SPAN`] characters back, or when the query contains
/// whitespace. An `@` right before the cursor yields an empty query.
#[must_use]
pub fn mention_query(text: &str, cursor: usize) -> Option<String> {
    let before: Vec<char> = text.chars().take(cursor).collect();
    let at = before
        .iter()
        .enumerate()
        .rev()
        .find(|&(index, ch)| *ch == '@' && !is_escaped(&before, index))
        .map(|(index, _)| index)?;
    if before.len() - at > MENTION_QUERY_SPAN {
        return None;
    }
    let query: String = before.iter().skip(at + 1).collect();
    if query.chars().any(char::is_whitespace) {
        return None;
    }
    Some(query)
}

fn is_escaped(chars: &[char], index: usize) -> bool {
    index
        .checked_sub(1)
        .and_then(|previous| chars.get(previous))
        .is_some_and(|ch| *ch == '\\')
}

/// Roster members matching `query`, excluding `requester`.
///
/// Matching is a case-insensitive substring test on display name or email;
/// an empty query matches everyone. Roster order is preserved.
#[must_use]
pub fn mention_candidates<'a>(
    roster: &'a [Profile],
    query: &str,
    requester: ProfileId,
) -> Vec<&'a Profile> {
    let needle = query.to_lowercase();
    roster
        .iter()
        .filter(|profile| profile.id() != requester)
        .filter(|profile| {
            needle.is_empty()
                || profile.display_name().to_lowercase().contains(&needle)
                || profile.email().to_lowercase().contains(&needle)
        })
        .collect()
}
