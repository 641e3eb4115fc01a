// RGBA colors and color literal parsing

use crate::error::{Result, ScatterError};
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{char, multispace0, u8 as dec_u8},
    combinator::{all_consuming, map, map_res, verify},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An RGBA color. Displays as `rgba(r, g, b, a)`, the form charting
/// libraries accept directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl ColorValue {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            r,
            g,
            b,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.r, self.g, self.b, alpha)
    }

    /// Build from HSV (`h` in degrees, `s`/`v` in 0..=1)
    pub fn from_hsv(h: f64, s: f64, v: f64, alpha: f64) -> Self {
        let h = h.rem_euclid(360.0);
        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_byte = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgba(to_byte(r), to_byte(g), to_byte(b), alpha)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` or a basic color name
pub fn parse_color(input: &str) -> Result<ColorValue> {
    all_consuming(color_literal)(input)
        .map(|(_, color)| color)
        .map_err(|_| ScatterError::InvalidColor(input.to_string()))
}

/// Parse a comma separated list of color literals, e.g.
/// `#ff0000, rgba(0, 0, 255, 0.5), gray`
pub fn parse_color_list(input: &str) -> Result<Vec<ColorValue>> {
    all_consuming(separated_list1(ws(char(',')), color_literal))(input)
        .map(|(_, colors)| colors)
        .map_err(|_| ScatterError::InvalidColor(input.to_string()))
}

fn color_literal(input: &str) -> IResult<&str, ColorValue> {
    ws(alt((hex_color, rgba_color, rgb_color, named_color)))(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |s: &str| u8::from_str_radix(s, 16),
    )(input)
}

fn hex_color(input: &str) -> IResult<&str, ColorValue> {
    map(
        preceded(char('#'), tuple((hex_pair, hex_pair, hex_pair))),
        |(r, g, b)| ColorValue::rgb(r, g, b),
    )(input)
}

fn channel(input: &str) -> IResult<&str, u8> {
    ws(dec_u8)(input)
}

fn rgb_color(input: &str) -> IResult<&str, ColorValue> {
    let (input, _) = tag_no_case("rgb")(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, r) = channel(input)?;
    let (input, _) = char(',')(input)?;
    let (input, g) = channel(input)?;
    let (input, _) = char(',')(input)?;
    let (input, b) = channel(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, ColorValue::rgb(r, g, b)))
}

fn rgba_color(input: &str) -> IResult<&str, ColorValue> {
    let (input, _) = tag_no_case("rgba")(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, r) = channel(input)?;
    let (input, _) = char(',')(input)?;
    let (input, g) = channel(input)?;
    let (input, _) = char(',')(input)?;
    let (input, b) = channel(input)?;
    let (input, _) = char(',')(input)?;
    let (input, a) = ws(verify(double, |a: &f64| (0.0..=1.0).contains(a)))(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, ColorValue::rgba(r, g, b, a)))
}

fn named_color(input: &str) -> IResult<&str, ColorValue> {
    alt((
        map(tag_no_case("black"), |_| ColorValue::rgb(0, 0, 0)),
        map(tag_no_case("white"), |_| ColorValue::rgb(255, 255, 255)),
        map(tag_no_case("red"), |_| ColorValue::rgb(214, 39, 40)),
        map(tag_no_case("green"), |_| ColorValue::rgb(44, 160, 44)),
        map(tag_no_case("blue"), |_| ColorValue::rgb(31, 119, 180)),
        map(tag_no_case("orange"), |_| ColorValue::rgb(255, 127, 14)),
        map(tag_no_case("purple"), |_| ColorValue::rgb(148, 103, 189)),
        map(tag_no_case("gray"), |_| ColorValue::rgb(127, 127, 127)),
    ))(input)
}
