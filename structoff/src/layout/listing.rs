//! Member listing scanner
//!
//! Pattern matching over single listing lines, decoupled from spawning
//! the tool. Array members, bitfields and function pointers do not match.

use crate::domain::Member;
use regex::Regex;
use std::sync::OnceLock;

fn member_line() -> &'static Regex {
    static MEMBER_LINE: OnceLock<Regex> = OnceLock::new();
    MEMBER_LINE.get_or_init(|| {
        Regex::new(r"(?P<type>\w.+?\S)\s+(?P<name>\w+);\s+/\*\s+(?P<offset>\d+)")
            .expect("member line pattern is valid")
    })
}

/// Parse one listing line into a member.
///
/// Returns `None` for lines that are not plain `type name; /* offset` members.
#[must_use]
pub fn parse_member_line(line: &str) -> Option<Member> {
    let caps = member_line().captures(line)?;
    let descriptor = &caps["type"];
    let offset = caps["offset"].parse().ok()?;

    let is_pointer = descriptor.ends_with('*');
    let type_name = descriptor.strip_prefix("struct ").unwrap_or(descriptor);
    let type_name = type_name.strip_suffix(" *").unwrap_or(type_name);

    Some(Member {
        name: caps["name"].to_string(),
        type_name: type_name.to_string(),
        is_pointer,
        offset,
    })
}

/// First member named `field` in a listing.
#[must_use]
pub fn find_member(listing: &str, field: &str) -> Option<Member> {
    listing.lines().filter_map(parse_member_line).find(|member| member.name == field)
}
