//! The `span` attribute of MMAX markables.
//!
//! A span is a comma-separated list of ranges over token ids, where each range is either a single id `word_3`
//! or an inclusive pair of ids `word_3..word_7`.

use std::fmt::Display;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, not, opt, recognize},
    multi::{many1, separated_list1},
    sequence::{delimited, preceded, terminated},
};

use crate::{error::Result, io::translate_nom_error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<Id = String> {
    ranges: Vec<SpanRange<Id>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanRange<Id> {
    Single(Id),
    Range { first: Id, last: Id },
}

impl Span<String> {
    pub fn parse(input: &str) -> Result<Self> {
        let (_, ranges) = all_consuming(parse_span)(input).map_err(translate_nom_error)?;
        Ok(Span { ranges }.map(|id| id.to_string()))
    }
}

impl<Id> Span<Id> {
    pub fn ranges(&self) -> &[SpanRange<Id>] {
        &self.ranges
    }

    /// Iterates over all boundary ids, in order of appearance.
    pub fn boundaries(&self) -> impl Iterator<Item = &Id> {
        self.ranges
            .iter()
            .flat_map(|range| match range {
                SpanRange::Single(id) => [Some(id), None],
                SpanRange::Range { first, last } => [Some(first), Some(last)],
            })
            .flatten()
    }

    pub fn map<NewId>(&self, mut f: impl FnMut(&Id) -> NewId) -> Span<NewId> {
        Span {
            ranges: self.ranges.iter().map(|range| range.map(&mut f)).collect(),
        }
    }

    /// Maps every boundary id, stopping at the first one that `f` rejects.
    ///
    /// The shape of each range is preserved.
    pub fn try_map<NewId, Error>(
        &self,
        mut f: impl FnMut(&Id) -> std::result::Result<NewId, Error>,
    ) -> std::result::Result<Span<NewId>, Error> {
        Ok(Span {
            ranges: self
                .ranges
                .iter()
                .map(|range| range.try_map(&mut f))
                .collect::<std::result::Result<_, _>>()?,
        })
    }
}

impl<Id> SpanRange<Id> {
    fn map<NewId>(&self, f: &mut impl FnMut(&Id) -> NewId) -> SpanRange<NewId> {
        match self {
            Self::Single(id) => SpanRange::Single(f(id)),
            Self::Range { first, last } => SpanRange::Range {
                first: f(first),
                last: f(last),
            },
        }
    }

    fn try_map<NewId, Error>(
        &self,
        f: &mut impl FnMut(&Id) -> std::result::Result<NewId, Error>,
    ) -> std::result::Result<SpanRange<NewId>, Error> {
        Ok(match self {
            Self::Single(id) => SpanRange::Single(f(id)?),
            Self::Range { first, last } => SpanRange::Range {
                first: f(first)?,
                last: f(last)?,
            },
        })
    }
}

fn parse_span(input: &str) -> IResult<&str, Vec<SpanRange<&str>>> {
    delimited(
        multispace0,
        separated_list1(delimited(multispace0, char(','), multispace0), parse_range),
        multispace0,
    )(input)
}

fn parse_range(input: &str) -> IResult<&str, SpanRange<&str>> {
    let (input, first) = parse_id(input)?;
    let (input, last) = opt(preceded(tag(".."), parse_id))(input)?;

    Ok((
        input,
        match last {
            Some(last) => SpanRange::Range { first, last },
            None => SpanRange::Single(first),
        },
    ))
}

/// An id ends before `..`, `,` or whitespace. Single dots are part of the id.
fn parse_id(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((
        take_while1(|c: char| c != ',' && c != '.' && !c.is_whitespace()),
        terminated(tag("."), not(char('.'))),
    ))))(input)
}

impl<Id: Display> Display for Span<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, range) in self.ranges.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

impl<Id: Display> Display for SpanRange<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(id) => write!(f, "{id}"),
            Self::Range { first, last } => write!(f, "{first}..{last}"),
        }
    }
}
