//! Multiplexed frame splitting (panic-free).
//!
//! A multiplexed frame is a run of `\u{FFFD}<len>\u{FFFD}<packet>` groups where
//! `<len>` counts the Unicode scalar values of `<packet>`. Group bodies are
//! taken by declared length only; the delimiter may legally appear inside a
//! packet (e.g. in a JSON string).
//!
//! When a group header is broken the splitter reports it and resumes at the
//! next position that looks like a well-formed header, so later groups are
//! still recovered.

use crate::error::SockioError;

/// Delimiter opening each group of a multiplexed frame.
pub const FRAME_DELIMITER: char = '\u{FFFD}';

/// Wrap one encoded packet as a multiplex group.
pub fn frame_wrap(packet_text: &str) -> String {
    let len = packet_text.chars().count();
    format!("{FRAME_DELIMITER}{len}{FRAME_DELIMITER}{packet_text}")
}

pub(crate) fn is_multiplexed(frame: &str) -> bool {
    frame.starts_with(FRAME_DELIMITER)
}

/// One slice of a multiplexed frame.
#[derive(Debug)]
pub(crate) enum Group<'a> {
    /// Packet text extracted by declared length.
    Packet(&'a str),
    /// Unusable span (bad header, stray text, over the group limit).
    Broken { raw: &'a str, error: SockioError },
}

/// Split a multiplexed frame into groups, at most `max_groups` of them; any
/// remainder past the limit becomes one trailing `Broken` group.
pub(crate) fn split_groups(frame: &str, max_groups: usize) -> Vec<Group<'_>> {
    let mut groups = Vec::new();
    let mut rest = frame;

    while !rest.is_empty() {
        if groups.len() == max_groups {
            groups.push(Group::Broken {
                raw: rest,
                error: SockioError::FrameDecode(format!(
                    "frame exceeds {max_groups} groups"
                )),
            });
            break;
        }

        match read_group(rest) {
            Ok((text, tail)) => {
                groups.push(Group::Packet(text));
                rest = tail;
            }
            Err(error) => {
                let skip = resync_point(rest);
                groups.push(Group::Broken {
                    raw: &rest[..skip],
                    error,
                });
                rest = &rest[skip..];
            }
        }
    }
    groups
}

/// Read one `<delim><len><delim><packet>` group; returns the packet text and the tail.
fn read_group(s: &str) -> Result<(&str, &str), SockioError> {
    let Some(after) = s.strip_prefix(FRAME_DELIMITER) else {
        return Err(SockioError::FrameDecode(
            "expected group delimiter".into(),
        ));
    };
    let Some((len_str, body)) = after.split_once(FRAME_DELIMITER) else {
        return Err(SockioError::FrameDecode(
            "unterminated group length".into(),
        ));
    };
    let len = parse_len(len_str)?;

    let end = match body.char_indices().nth(len) {
        Some((idx, _)) => idx,
        None => {
            let available = body.chars().count();
            if available != len {
                return Err(SockioError::FrameDecode(format!(
                    "group length {len} exceeds remaining {available} characters"
                )));
            }
            body.len()
        }
    };
    Ok(body.split_at(end))
}

fn parse_len(s: &str) -> Result<usize, SockioError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SockioError::FrameDecode(format!(
            "invalid group length {s:?}"
        )));
    }
    s.parse::<usize>()
        .map_err(|e| SockioError::FrameDecode(format!("invalid group length {s:?}: {e}")))
}

/// Byte offset of the next plausible group header after the first character
/// of `s`, or `s.len()` if none remains.
fn resync_point(s: &str) -> usize {
    let start = s.chars().next().map_or(0, char::len_utf8);
    s[start..]
        .match_indices(FRAME_DELIMITER)
        .map(|(idx, _)| start + idx)
        .find(|&idx| has_group_header(&s[idx..]))
        .unwrap_or(s.len())
}

fn has_group_header(s: &str) -> bool {
    s.strip_prefix(FRAME_DELIMITER)
        .and_then(|t| t.split_once(FRAME_DELIMITER))
        .is_some_and(|(len, _)| parse_len(len).is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn texts<'a>(groups: &[Group<'a>]) -> Vec<Result<&'a str, ErrorCode>> {
        groups
            .iter()
            .map(|g| match g {
                Group::Packet(t) => Ok(*t),
                Group::Broken { error, .. } => Err(error.code()),
            })
            .collect()
    }

    #[test]
    fn wrap_counts_characters_not_bytes() {
        assert_eq!(frame_wrap("3:::é"), "\u{FFFD}5\u{FFFD}3:::é");
    }

    #[test]
    fn splits_by_declared_length() {
        let frame = format!("{}{}", frame_wrap("3:::a"), frame_wrap("8::"));
        let groups = split_groups(&frame, 16);
        assert_eq!(texts(&groups), vec![Ok("3:::a"), Ok("8::")]);
    }

    #[test]
    fn delimiter_inside_packet_is_not_a_boundary() {
        let inner = "3:::x\u{FFFD}2\u{FFFD}y";
        let frame = format!("{}{}", frame_wrap(inner), frame_wrap("2::"));
        let groups = split_groups(&frame, 16);
        assert_eq!(texts(&groups), vec![Ok(inner), Ok("2::")]);
    }

    #[test]
    fn corrupt_length_is_contained() {
        let frame = format!(
            "{}\u{FFFD}x1\u{FFFD}3:::bad{}",
            frame_wrap("3:::a"),
            frame_wrap("3:::b")
        );
        let groups = split_groups(&frame, 16);
        assert_eq!(
            texts(&groups),
            vec![Ok("3:::a"), Err(ErrorCode::FrameDecode), Ok("3:::b")]
        );
        let Group::Broken { raw, .. } = &groups[1] else {
            panic!("expected broken group");
        };
        assert_eq!(*raw, "\u{FFFD}x1\u{FFFD}3:::bad");
    }

    #[test]
    fn overlong_length_consumes_rest() {
        let frame = format!("{}\u{FFFD}99\u{FFFD}3:::x", frame_wrap("8::"));
        let groups = split_groups(&frame, 16);
        assert_eq!(texts(&groups), vec![Ok("8::"), Err(ErrorCode::FrameDecode)]);
    }

    #[test]
    fn overlong_length_resyncs_at_next_header() {
        let frame = format!(
            "{}\u{FFFD}99\u{FFFD}3:::x{}",
            frame_wrap("8::"),
            frame_wrap("2::")
        );
        let groups = split_groups(&frame, 16);
        assert_eq!(
            texts(&groups),
            vec![Ok("8::"), Err(ErrorCode::FrameDecode), Ok("2::")]
        );
    }

    #[test]
    fn stray_text_between_groups() {
        let frame = format!("{}junk{}", frame_wrap("8::"), frame_wrap("2::"));
        let groups = split_groups(&frame, 16);
        assert_eq!(
            texts(&groups),
            vec![Ok("8::"), Err(ErrorCode::FrameDecode), Ok("2::")]
        );
    }

    #[test]
    fn group_limit_reports_remainder() {
        let frame = format!("{}{}{}", frame_wrap("8::"), frame_wrap("8::"), frame_wrap("8::"));
        let groups = split_groups(&frame, 2);
        assert_eq!(
            texts(&groups),
            vec![Ok("8::"), Ok("8::"), Err(ErrorCode::FrameDecode)]
        );
    }

    #[test]
    fn zero_length_group() {
        let frame = format!("{}{}", frame_wrap(""), frame_wrap("8::"));
        let groups = split_groups(&frame, 16);
        assert_eq!(texts(&groups), vec![Ok(""), Ok("8::")]);
    }
}
