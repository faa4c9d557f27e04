/// parse task document with structure like
/// ```text
/// title1
/// key1: value1, value2
/// key2: value3
/// title2
/// key3: value4
/// ```
/// into `HashMap<title, HashMap<key, Vec<TaskValue>>>`. Lines starting with `#` or `//`
/// are comments. Keys missing from a section are simply absent from its map; callers
/// fall back to their defaults.
use crate::symbolic::symbolic_errors::CalcError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type TaskSection = HashMap<String, Vec<TaskValue>>;
pub type TaskDocument = HashMap<String, TaskSection>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum TaskValue {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl TaskValue {
    fn from_token(token: &str) -> TaskValue {
        if let Ok(val) = token.parse::<i64>() {
            TaskValue::Integer(val)
        } else if let Some(val) = token.parse::<f64>().ok().filter(|v| v.is_finite()) {
            // `inf` and `nan` stay words
            TaskValue::Float(val)
        } else if let Ok(val) = token.parse::<bool>() {
            TaskValue::Boolean(val)
        } else {
            TaskValue::String(token.to_string())
        }
    }

    /// floats and integers both read as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            TaskValue::Float(f) => Some(*f),
            TaskValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let TaskValue::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        if let TaskValue::String(s) = self {
            Some(s)
        } else {
            None
        }
    }
}

impl Display for TaskValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskValue::String(s) => write!(f, "{}", s),
            TaskValue::Float(val) => write!(f, "{}", val),
            TaskValue::Integer(val) => write!(f, "{}", val),
            TaskValue::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// word characters without spaces, used both for titles and keys
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

fn parse_value(input: &str) -> IResult<&str, TaskValue> {
    let token = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\r' | '\n' | ';'));
    map(token, TaskValue::from_token).parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<TaskValue>> {
    let separator_comma = delimited(space0, tag(","), space0);
    separated_list1(separator_comma, parse_value).parse(input)
}

/// `key: value, value`
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<TaskValue>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    separated_pair(parse_identifier, colon_separator, parse_value_list).parse(input)
}

/// a title followed by at least one key-value pair
fn parse_section(input: &str) -> IResult<&str, (String, TaskSection)> {
    let (input, title) = preceded(multispace0, parse_identifier).parse(input)?;
    let (input, pairs) = many1(preceded(multispace0, parse_key_value_pair)).parse(input)?;
    let section: TaskSection = pairs.into_iter().collect();
    Ok((input, (title, section)))
}

/// Filters out comment lines (starting with // or #)
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with('#')
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document; anything left unparsed is an error.
pub fn parse_document(input: &str) -> Result<TaskDocument, CalcError> {
    let filtered = filter_comments(input);
    let mut parser = many1(delimited(multispace0, parse_section, multispace0));
    match parser.parse(filtered.as_str()) {
        Ok((remaining, sections)) => {
            if !remaining.trim().is_empty() {
                return Err(CalcError::InvalidTask(format!(
                    "failed to parse entire document. Remaining: '{}'",
                    remaining
                )));
            }
            Ok(sections.into_iter().collect())
        }
        Err(e) => Err(CalcError::InvalidTask(format!("parsing error: {:?}", e))),
    }
}

/// first value stored under `key`, if any
pub fn first_value<'a>(section: &'a TaskSection, key: &str) -> Option<&'a TaskValue> {
    section.get(key).and_then(|values| values.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_section() {
        let input = "riemann\nvariable: x\nstart: 0\nend: 2.5\nrule: left\n";
        let doc = parse_document(input).unwrap();
        let section = &doc["riemann"];
        assert_eq!(
            first_value(section, "variable"),
            Some(&TaskValue::String("x".to_string()))
        );
        assert_eq!(first_value(section, "start"), Some(&TaskValue::Integer(0)));
        assert_eq!(first_value(section, "end").and_then(|v| v.as_float()), Some(2.5));
        assert_eq!(first_value(section, "missing"), None);
    }

    #[test]
    fn test_parse_lists_comments_and_several_sections() {
        let input = "
            # integration task
            riemann
            bounds: 0.0, 1.0
            // logging
            log
            loglevel: off
            to_file: false
        ";
        let doc = parse_document(input).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc["riemann"]["bounds"],
            vec![TaskValue::Float(0.0), TaskValue::Float(1.0)]
        );
        assert_eq!(doc["log"]["to_file"], vec![TaskValue::Boolean(false)]);
        assert_eq!(doc["log"]["loglevel"][0].to_string(), "off");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_document("riemann"),
            Err(CalcError::InvalidTask(_))
        ));
        assert!(matches!(
            parse_document("riemann\nstart: 1\n: 2"),
            Err(CalcError::InvalidTask(_))
        ));
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(TaskValue::Integer(3).as_float(), Some(3.0));
        assert_eq!(TaskValue::Integer(3).as_integer(), Some(3));
        assert_eq!(TaskValue::Float(3.5).as_integer(), None);
        assert_eq!(TaskValue::String("x".into()).as_string(), Some("x"));
        assert_eq!(TaskValue::Boolean(true).as_float(), None);
        assert_eq!(TaskValue::from_token("inf"), TaskValue::String("inf".into()));
        assert_eq!(TaskValue::from_token("NaN"), TaskValue::String("NaN".into()));
        assert_eq!(TaskValue::from_token("-1e-3"), TaskValue::Float(-1e-3));
    }
}
