// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CSS colour parsing using nom
//!
//! Covers the forms the chat service and colour picker emit: hex notation,
//! `rgb()`/`rgba()` and the basic named colours.

use nom::{
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, map_opt, opt},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

/// Parse a CSS colour into RGBA components in 0-1 range
pub fn parse_css_color(input: &str) -> Option<[f32; 4]> {
    let input = input.trim();
    if let Ok((_, rgba)) = all_consuming(hex_color)(input) {
        return Some(rgba);
    }
    if let Ok((_, rgba)) = all_consuming(functional_color)(input) {
        return Some(rgba);
    }
    named_color(input)
}

/// #rgb, #rgba, #rrggbb, #rrggbbaa
fn hex_color(input: &str) -> IResult<&str, [f32; 4]> {
    map_opt(
        preceded(
            char('#'),
            take_while_m_n(3, 8, |c: char| c.is_ascii_hexdigit()),
        ),
        expand_hex,
    )(input)
}

fn expand_hex(digits: &str) -> Option<[f32; 4]> {
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

    let rgba = match digits.len() {
        3 => [nibble(0)?, nibble(1)?, nibble(2)?, 255],
        4 => [nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?],
        6 => [byte(0)?, byte(2)?, byte(4)?, 255],
        8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
        _ => return None,
    };
    Some(rgba.map(|c| c as f32 / 255.0))
}

/// A number with an optional trailing percent sign
fn component(input: &str) -> IResult<&str, (f64, bool)> {
    map(pair(double, opt(char('%'))), |(value, percent)| {
        (value, percent.is_some())
    })(input)
}

/// rgb(r, g, b) and rgba(r, g, b, a)
fn functional_color(input: &str) -> IResult<&str, [f32; 4]> {
    map_opt(
        preceded(
            pair(tag_no_case("rgb"), opt(tag_no_case("a"))),
            delimited(
                pair(char('('), multispace0),
                separated_list1(tuple((multispace0, char(','), multispace0)), component),
                pair(multispace0, char(')')),
            ),
        ),
        |components| {
            let channel = |(value, percent): (f64, bool)| {
                let value = if percent { value * 2.55 } else { value };
                (value.clamp(0.0, 255.0) / 255.0) as f32
            };
            let alpha = |(value, percent): (f64, bool)| {
                let value = if percent { value / 100.0 } else { value };
                value.clamp(0.0, 1.0) as f32
            };
            match components.as_slice() {
                [r, g, b] => Some([channel(*r), channel(*g), channel(*b), 1.0]),
                [r, g, b, a] => Some([channel(*r), channel(*g), channel(*b), alpha(*a)]),
                _ => None,
            }
        },
    )(input)
}

fn named_color(name: &str) -> Option<[f32; 4]> {
    let hex = match name.to_ascii_lowercase().as_str() {
        "black" => "000000",
        "white" => "ffffff",
        "red" => "ff0000",
        "lime" => "00ff00",
        "green" => "008000",
        "blue" => "0000ff",
        "yellow" => "ffff00",
        "cyan" | "aqua" => "00ffff",
        "magenta" | "fuchsia" => "ff00ff",
        "gray" | "grey" => "808080",
        "silver" => "c0c0c0",
        "maroon" => "800000",
        "olive" => "808000",
        "purple" => "800080",
        "teal" => "008080",
        "navy" => "000080",
        "orange" => "ffa500",
        _ => return None,
    };
    expand_hex(hex)
}
