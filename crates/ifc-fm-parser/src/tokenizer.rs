// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP file tokenizer using nom combinators
//!
//! Parses STEP/IFC entity definitions into tokens. Strings stay borrowed
//! and undecoded until they are turned into [`AttributeValue`]s.

use ifc_fm_model::{AttributeValue, DecodedEntity, EntityId, IfcType};
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{opt, recognize},
    error::{Error, ErrorKind},
    multi::separated_list0,
    sequence::{delimited, pair},
    IResult, Parser,
};

/// Raw token from STEP file (before conversion to AttributeValue)
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    /// Entity reference (#123)
    EntityRef(u32),
    /// String value, still STEP-encoded
    String(&'a str),
    Integer(i64),
    Float(f64),
    /// Enumeration (.VALUE.)
    Enum(&'a str),
    List(Vec<Token<'a>>),
    /// Typed value like IFCLABEL('text')
    TypedValue(&'a str, Vec<Token<'a>>),
    /// Null value ($)
    Null,
    /// Derived value (*)
    Derived,
}

impl<'a> Token<'a> {
    /// Convert token to owned AttributeValue
    pub fn to_attribute_value(&self) -> AttributeValue {
        match self {
            Token::EntityRef(id) => AttributeValue::EntityRef(EntityId(*id)),
            Token::String(s) => AttributeValue::String(decode_step_string(s)),
            Token::Integer(i) => AttributeValue::Integer(*i),
            Token::Float(f) => AttributeValue::Float(*f),
            Token::Enum(s) => AttributeValue::Enum((*s).to_string()),
            Token::List(items) => {
                AttributeValue::List(items.iter().map(|t| t.to_attribute_value()).collect())
            }
            Token::TypedValue(name, args) => AttributeValue::TypedValue(
                (*name).to_string(),
                args.iter().map(|t| t.to_attribute_value()).collect(),
            ),
            Token::Null => AttributeValue::Null,
            Token::Derived => AttributeValue::Derived,
        }
    }
}

/// Decode the body of a STEP string literal
///
/// Handles doubled quotes, `\\`, `\S\` (upper Latin-1 half), `\X\hh`
/// (single Latin-1 byte) and `\X2\...\X0\` (UTF-16 code units). Malformed
/// escapes are kept literally.
pub fn decode_step_string(raw: &str) -> String {
    if !raw.contains(['\'', '\\']) {
        return raw.to_string();
    }

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' if bytes.get(i + 1) == Some(&b'\'') => {
                out.push('\'');
                i += 2;
            }
            b'\\' => {
                let rest = &raw[i..];
                if let Some((decoded, consumed)) = decode_escape(rest) {
                    out.push_str(&decoded);
                    i += consumed;
                } else {
                    out.push('\\');
                    i += 1;
                }
            }
            _ => {
                // i is always on a char boundary: every branch advances by whole chars
                let Some(ch) = raw[i..].chars().next() else {
                    break;
                };
                out.push(ch);
                i += ch.len_utf8();
            }
        }
    }

    out
}

/// Decode one escape at the start of `rest`; returns the text and bytes consumed
fn decode_escape(rest: &str) -> Option<(String, usize)> {
    if rest.starts_with("\\\\") {
        return Some(("\\".to_string(), 2));
    }

    if let Some(after) = rest.strip_prefix("\\X2\\") {
        let end = after.find("\\X0\\")?;
        let hex = &after[..end];
        // Hex digits only, so the 4-byte slices below stay on char boundaries
        if hex.is_empty() || hex.len() % 4 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let units = (0..hex.len())
            .step_by(4)
            .map(|k| u16::from_str_radix(&hex[k..k + 4], 16).ok())
            .collect::<Option<Vec<u16>>>()?;
        let decoded = char::decode_utf16(units)
            .collect::<Result<String, _>>()
            .ok()?;
        return Some((decoded, 4 + end + 4));
    }

    if let Some(after) = rest.strip_prefix("\\X\\") {
        let digits = after.get(..2).filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))?;
        let byte = u8::from_str_radix(digits, 16).ok()?;
        return Some((char::from(byte).to_string(), 5));
    }

    if let Some(after) = rest.strip_prefix("\\S\\") {
        let ch = after.chars().next().filter(char::is_ascii)?;
        return Some((char::from(ch as u8 + 128).to_string(), 4));
    }

    None
}

// ============================================================================
// Parsing Primitives
// ============================================================================

fn ws(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    Ok((input, ()))
}

/// Parse an entity reference (#123)
fn entity_ref(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('#')(input)?;
    let (rest, digits) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    let id = digits
        .parse::<u32>()
        .map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::Digit)))?;
    Ok((rest, Token::EntityRef(id)))
}

/// Parse a STEP string ('text' with '' for escaped quotes)
fn step_string(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('\'')(input)?;

    let bytes = input.as_bytes();
    let mut end = 0;
    while end < bytes.len() {
        if bytes[end] == b'\'' {
            if end + 1 < bytes.len() && bytes[end + 1] == b'\'' {
                end += 2;
                continue;
            }
            break;
        }
        end += 1;
    }

    if end >= bytes.len() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Char)));
    }

    Ok((&input[end + 1..], Token::String(&input[..end])))
}

/// Parse a number (integer or float)
fn number(input: &str) -> IResult<&str, Token> {
    let (rest, num_str) = recognize((
        opt(alt((char('-'), char('+')))),
        take_while1(|c: char| c.is_ascii_digit()),
        opt(pair(char('.'), take_while(|c: char| c.is_ascii_digit()))),
        opt((
            alt((char('e'), char('E'))),
            opt(alt((char('+'), char('-')))),
            take_while1(|c: char| c.is_ascii_digit()),
        )),
    ))
    .parse(input)?;

    let bad_number = |_| nom::Err::Error(Error::new(input, ErrorKind::Float));

    if num_str.contains(['.', 'e', 'E']) {
        let f: f64 = lexical_core::parse(num_str.as_bytes()).map_err(bad_number)?;
        Ok((rest, Token::Float(f)))
    } else {
        let i: i64 = lexical_core::parse(num_str.as_bytes()).map_err(bad_number)?;
        Ok((rest, Token::Integer(i)))
    }
}

/// Parse an enumeration (.VALUE.)
fn enumeration(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('.')(input)?;
    let (input, name) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    let (input, _) = char('.')(input)?;
    Ok((input, Token::Enum(name)))
}

fn null_value(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('$')(input)?;
    Ok((input, Token::Null))
}

fn derived_value(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('*')(input)?;
    Ok((input, Token::Derived))
}

/// Parenthesised, comma-separated tokens
fn token_list(input: &str) -> IResult<&str, Vec<Token>> {
    delimited(
        pair(char('('), ws),
        separated_list0((ws, char(','), ws), token),
        pair(ws, char(')')),
    )
    .parse(input)
}

fn list(input: &str) -> IResult<&str, Token> {
    let (input, items) = token_list(input)?;
    Ok((input, Token::List(items)))
}

/// Parse a typed value like IFCLABEL('text')
fn typed_value(input: &str) -> IResult<&str, Token> {
    let (input, type_name) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    let (input, _) = ws(input)?;
    let (input, args) = token_list(input)?;
    Ok((input, Token::TypedValue(type_name, args)))
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        entity_ref,
        step_string,
        null_value,
        derived_value,
        enumeration,
        number,
        list,
        typed_value,
    ))
    .parse(input)
}

// ============================================================================
// Entity Parsing
// ============================================================================

/// Parse a complete entity definition
///
/// Format: `#123=IFCWALL(attr1,attr2,...);`
pub fn parse_entity(input: &str) -> Result<DecodedEntity, String> {
    let input = input.trim_start();

    let (input, _) = char::<&str, Error<&str>>('#')
        .parse(input)
        .map_err(|_| "Expected # at start of entity")?;

    let (input, id_str) = take_while1::<_, &str, Error<&str>>(|c: char| c.is_ascii_digit())
        .parse(input)
        .map_err(|_| "Expected entity ID")?;

    let id: u32 = id_str.parse().map_err(|_| "Invalid entity ID")?;

    let (input, _) = (ws, char('='), ws)
        .parse(input)
        .map_err(|_: nom::Err<Error<&str>>| "Expected = after entity ID")?;

    let (input, type_name) =
        take_while1::<_, &str, Error<&str>>(|c: char| c.is_alphanumeric() || c == '_')
            .parse(input)
            .map_err(|_| "Expected type name")?;

    let (input, _) = ws(input).unwrap_or((input, ()));

    let (_, tokens) =
        token_list(input).map_err(|e| format!("Failed to parse attributes: {:?}", e))?;

    Ok(DecodedEntity {
        id: EntityId(id),
        ifc_type: IfcType::parse(type_name),
        attributes: tokens.iter().map(|t| t.to_attribute_value()).collect(),
    })
}

/// Parse entity from the content slice at the given byte range
pub fn parse_entity_at(content: &str, start: usize, end: usize) -> Result<DecodedEntity, String> {
    let slice = content
        .get(start..end)
        .ok_or_else(|| format!("byte range {start}..{end} out of bounds"))?;
    parse_entity(slice)
}
