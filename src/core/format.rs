//! Format string parsing and rendering
//!
//! Format strings follow the familiar brace syntax: literal text, `{{` and
//! `}}` escapes, and replacement fields `{[arg][:spec]}`. `arg` is empty
//! (next implicit position), a decimal index or an identifier naming an
//! argument. `spec` is
//! `[[fill]align][sign]['#']['0'][width]['.'precision][type]`.
//!
//! Rendering checks the whole call before producing output: unknown or
//! missing arguments, unused arguments, and specs that do not fit the
//! argument's kind are all errors.
//!
//! # Unsupported features
//! * Argument widths or precisions: `{:{}}` or `{:.*}`

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{alpha1, alphanumeric1, anychar, digit1, one_of},
    combinator::{map_res, opt, recognize, value},
    multi::{many0, many0_count},
    sequence::{pair, preceded},
    IResult,
};
use std::fmt;

use super::argument::{Argument, ArgumentList};
use super::error::{LogError, Result};

/// Which argument a replacement field refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRef<'a> {
    /// `{}`: the next implicit position
    Next,
    /// `{2}`
    Index(usize),
    /// `{name}`
    Named(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    /// Only negative values carry a sign
    #[default]
    Minus,
    Plus,
    Space,
}

/// The trailing type character of a spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    #[default]
    Default,
    /// `d`
    Decimal,
    /// `x`
    Hex,
    /// `X`
    UpperHex,
    /// `o`
    Octal,
    /// `b`
    Binary,
    /// `e`
    Exponent,
    /// `E`
    UpperExponent,
    /// `f`
    Fixed,
    /// `F`
    UpperFixed,
    /// `s`
    Str,
    /// `c`
    Char,
    /// `?`
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub alignment: Option<Alignment>,
    pub sign: Sign,
    pub alternate: bool,
    pub zero_pad: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub presentation: Presentation,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            alignment: None,
            sign: Sign::Minus,
            alternate: false,
            zero_pad: false,
            width: None,
            precision: None,
            presentation: Presentation::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement<'a> {
    pub argument: ArgumentRef<'a>,
    pub spec: FormatSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    Literal(&'a str),
    Replacement(Replacement<'a>),
}

/// A parsed format string, borrowing its literal text from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatString<'a> {
    pub fragments: Vec<Fragment<'a>>,
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>())(input)
}

/// `{name}`. Matches a Rust identifier.
fn named_argument(input: &str) -> IResult<&str, ArgumentRef<'_>> {
    let (input, ident) = recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)?;

    Ok((input, ArgumentRef::Named(ident)))
}

fn indexed_argument(input: &str) -> IResult<&str, ArgumentRef<'_>> {
    let (input, index) = number(input)?;

    Ok((input, ArgumentRef::Index(index)))
}

fn argument(input: &str) -> IResult<&str, ArgumentRef<'_>> {
    let (input, argument) = opt(alt((indexed_argument, named_argument)))(input)?;

    Ok((input, argument.unwrap_or(ArgumentRef::Next)))
}

fn bare_alignment(input: &str) -> IResult<&str, Alignment> {
    alt((
        value(Alignment::Left, tag("<")),
        value(Alignment::Center, tag("^")),
        value(Alignment::Right, tag(">")),
    ))(input)
}

/// An optional fill character plus alignment.
fn alignment(input: &str) -> IResult<&str, (char, Option<Alignment>)> {
    // Try the fill form first so that `<<` reads as fill '<', align left.
    if let Ok((rest, (fill, alignment))) = pair(anychar, bare_alignment)(input) {
        if fill != '{' && fill != '}' {
            return Ok((rest, (fill, Some(alignment))));
        }
    }

    if let Ok((rest, alignment)) = bare_alignment(input) {
        return Ok((rest, (' ', Some(alignment))));
    }

    Ok((input, (' ', None)))
}

fn sign(input: &str) -> IResult<&str, Sign> {
    let (input, sign) = opt(one_of("+- "))(input)?;
    let sign = match sign {
        Some('+') => Sign::Plus,
        Some(' ') => Sign::Space,
        _ => Sign::Minus,
    };

    Ok((input, sign))
}

fn presentation(input: &str) -> IResult<&str, Presentation> {
    let (input, presentation) = opt(alt((
        value(Presentation::Debug, tag("?")),
        value(Presentation::Decimal, tag("d")),
        value(Presentation::Hex, tag("x")),
        value(Presentation::UpperHex, tag("X")),
        value(Presentation::Octal, tag("o")),
        value(Presentation::Binary, tag("b")),
        value(Presentation::Exponent, tag("e")),
        value(Presentation::UpperExponent, tag("E")),
        value(Presentation::Fixed, tag("f")),
        value(Presentation::UpperFixed, tag("F")),
        value(Presentation::Str, tag("s")),
        value(Presentation::Char, tag("c")),
    )))(input)?;

    Ok((input, presentation.unwrap_or_default()))
}

/// The part after the `:` in a replacement field.
fn format_spec(input: &str) -> IResult<&str, FormatSpec> {
    let (input, _) = tag(":")(input)?;
    let (input, (fill, alignment)) = alignment(input)?;
    let (input, sign) = sign(input)?;
    let (input, alternate) = opt(tag("#"))(input)?;
    let (input, zero_pad) = opt(tag("0"))(input)?;
    let (input, width) = opt(number)(input)?;
    let (input, precision) = opt(preceded(tag("."), number))(input)?;
    let (input, presentation) = presentation(input)?;

    Ok((
        input,
        FormatSpec {
            fill,
            alignment,
            sign,
            alternate: alternate.is_some(),
            zero_pad: zero_pad.is_some(),
            width,
            precision,
            presentation,
        },
    ))
}

/// A complete `{...}` replacement field.
fn replacement(input: &str) -> IResult<&str, Fragment<'_>> {
    let (input, _) = tag("{")(input)?;
    let (input, argument) = argument(input)?;
    let (input, spec) = opt(format_spec)(input)?;
    let (input, _) = tag("}")(input)?;

    Ok((
        input,
        Fragment::Replacement(Replacement {
            argument,
            spec: spec.unwrap_or_default(),
        }),
    ))
}

/// An escaped `{` or `}`.
fn escape(input: &str) -> IResult<&str, Fragment<'_>> {
    let (input, escaped) = alt((tag("{{"), tag("}}")))(input)?;

    Ok((input, Fragment::Literal(&escaped[..1])))
}

fn literal(input: &str) -> IResult<&str, Fragment<'_>> {
    let (input, text) = take_till1(|c: char| c == '{' || c == '}')(input)?;

    Ok((input, Fragment::Literal(text)))
}

fn fragment(input: &str) -> IResult<&str, Fragment<'_>> {
    alt((escape, replacement, literal))(input)
}

fn describe_failure(rest: &str) -> &'static str {
    if rest.starts_with('}') {
        "unmatched '}' (write '}}' for a literal brace)"
    } else if !rest.contains('}') {
        "unmatched '{' (write '{{' for a literal brace)"
    } else {
        "invalid replacement field"
    }
}

impl<'a> FormatString<'a> {
    /// Parses a brace style format string.
    pub fn parse(format: &'a str) -> Result<Self> {
        let (rest, fragments) = many0(fragment)(format)
            .map_err(|e| LogError::malformed(format, 0, e.to_string()))?;

        // The parser stops at the first fragment it cannot read.
        if !rest.is_empty() {
            return Err(LogError::malformed(
                format,
                format.len() - rest.len(),
                describe_failure(rest),
            ));
        }

        Ok(Self { fragments })
    }

    /// Number of replacement fields
    pub fn replacement_count(&self) -> usize {
        self.fragments
            .iter()
            .filter(|fragment| matches!(fragment, Fragment::Replacement(_)))
            .count()
    }

    /// Substitutes `args` into the parsed string.
    pub fn render(&self, args: &ArgumentList<'_>) -> Result<String> {
        let mut used = vec![false; args.len()];
        let mut next = 0;
        let mut out = String::with_capacity(64);

        for fragment in &self.fragments {
            let replacement = match fragment {
                Fragment::Literal(text) => {
                    out.push_str(text);
                    continue;
                }
                Fragment::Replacement(replacement) => replacement,
            };

            let index = match replacement.argument {
                ArgumentRef::Next => {
                    next += 1;
                    next - 1
                }
                ArgumentRef::Index(index) => index,
                ArgumentRef::Named(name) => args
                    .position(name)
                    .ok_or_else(|| LogError::unknown_name(name))?,
            };
            let argument = args
                .get(index)
                .ok_or_else(|| LogError::out_of_range(index, args.len()))?;

            used[index] = true;
            write_argument(&mut out, argument, &replacement.spec)
                .map_err(|message| LogError::incompatible(index, argument.kind(), message))?;
        }

        if let Some(index) = used.iter().position(|used| !used) {
            return Err(LogError::unused(index));
        }

        Ok(out)
    }
}

/// Parses `format` and substitutes `args`.
///
/// ```
/// use rust_log_facade::{render, ArgumentList, NamedArgument};
///
/// let entries = [NamedArgument::positional(&4)];
/// let message = render("started with {} workers", &ArgumentList::new(&entries)).unwrap();
/// assert_eq!(message, "started with 4 workers");
/// ```
pub fn render(format: &str, args: &ArgumentList<'_>) -> Result<String> {
    FormatString::parse(format)?.render(args)
}

type SpecResult = std::result::Result<(), &'static str>;

fn write_argument(out: &mut String, argument: &Argument<'_>, spec: &FormatSpec) -> SpecResult {
    use Presentation as P;

    match *argument {
        Argument::Signed(v) => write_integer(out, v < 0, v.unsigned_abs(), spec),
        Argument::Unsigned(v) => write_integer(out, false, v, spec),
        Argument::Float(v) => write_float(out, v, spec),
        Argument::Bool(v) => match spec.presentation {
            P::Default | P::Str | P::Debug => write_text(out, if v { "true" } else { "false" }, spec),
            _ => Err("presentation type not supported for bool"),
        },
        Argument::Char(c) => match spec.presentation {
            P::Default | P::Char => write_text(out, c.encode_utf8(&mut [0; 4]), spec),
            P::Debug => write_debug(out, &c, spec),
            _ => Err("presentation type not supported for char"),
        },
        Argument::Str(s) => match spec.presentation {
            P::Default | P::Str => write_text(out, s, spec),
            P::Debug => write_debug(out, &s, spec),
            _ => Err("presentation type not supported for strings"),
        },
        Argument::Display(d) => match spec.presentation {
            P::Default | P::Str => write_text(out, &d.to_string(), spec),
            _ => Err("only '{}' and '{:s}' apply to Display values"),
        },
        Argument::Debug(d) => match spec.presentation {
            P::Default | P::Debug => write_debug(out, d, spec),
            _ => Err("only '{}' and '{:?}' apply to Debug values"),
        },
    }
}

fn write_integer(out: &mut String, negative: bool, magnitude: u64, spec: &FormatSpec) -> SpecResult {
    use Presentation as P;

    if spec.precision.is_some() {
        return Err("precision not allowed for integers");
    }

    let (prefix, digits) = match spec.presentation {
        P::Default | P::Decimal | P::Debug => ("", magnitude.to_string()),
        P::Hex => ("0x", format!("{:x}", magnitude)),
        P::UpperHex => ("0X", format!("{:X}", magnitude)),
        P::Octal => ("0", format!("{:o}", magnitude)),
        P::Binary => ("0b", format!("{:b}", magnitude)),
        P::Char => {
            let c = u32::try_from(magnitude)
                .ok()
                .filter(|_| !negative)
                .and_then(char::from_u32)
                .ok_or("integer is not a valid char")?;
            return write_text(out, c.encode_utf8(&mut [0; 4]), spec);
        }
        _ => return Err("presentation type not supported for integers"),
    };

    let prefix = if spec.alternate { prefix } else { "" };
    write_number(out, negative, prefix, &digits, spec);
    Ok(())
}

fn write_float(out: &mut String, v: f64, spec: &FormatSpec) -> SpecResult {
    use Presentation as P;

    if spec.alternate {
        return Err("'#' flag not allowed for floats");
    }

    let negative = v.is_sign_negative() && !v.is_nan();
    let magnitude = v.abs();

    let digits = match (spec.presentation, spec.precision) {
        (P::Default, None) => magnitude.to_string(),
        (P::Debug, None) => format!("{:?}", magnitude),
        (P::Default | P::Debug, Some(p)) => format!("{:.*}", p, magnitude),
        (P::Fixed, p) => format!("{:.*}", p.unwrap_or(6), magnitude),
        (P::UpperFixed, p) => format!("{:.*}", p.unwrap_or(6), magnitude).to_uppercase(),
        (P::Exponent, None) => format!("{:e}", magnitude),
        (P::Exponent, Some(p)) => format!("{:.*e}", p, magnitude),
        (P::UpperExponent, None) => format!("{:E}", magnitude),
        (P::UpperExponent, Some(p)) => format!("{:.*E}", p, magnitude),
        _ => return Err("presentation type not supported for floats"),
    };

    write_number(out, negative, "", &digits, spec);
    Ok(())
}

fn write_number(out: &mut String, negative: bool, prefix: &str, digits: &str, spec: &FormatSpec) {
    let sign = match (negative, spec.sign) {
        (true, _) => "-",
        (false, Sign::Plus) => "+",
        (false, Sign::Space) => " ",
        (false, Sign::Minus) => "",
    };

    // Zero padding goes between the sign/prefix and the digits, and only
    // applies when no explicit alignment was requested.
    if spec.zero_pad && spec.alignment.is_none() {
        let len = sign.len() + prefix.len() + digits.chars().count();
        out.push_str(sign);
        out.push_str(prefix);
        for _ in len..spec.width.unwrap_or(0) {
            out.push('0');
        }
        out.push_str(digits);
    } else {
        pad(out, &format!("{sign}{prefix}{digits}"), spec, Alignment::Right);
    }
}

fn check_text_flags(spec: &FormatSpec) -> SpecResult {
    if spec.sign != Sign::Minus {
        return Err("sign not allowed for text");
    }
    if spec.zero_pad {
        return Err("'0' flag not allowed for text");
    }
    Ok(())
}

fn write_text(out: &mut String, text: &str, spec: &FormatSpec) -> SpecResult {
    check_text_flags(spec)?;
    if spec.alternate {
        return Err("'#' flag not allowed for text");
    }

    pad(out, truncate(text, spec.precision), spec, Alignment::Left);
    Ok(())
}

fn write_debug(out: &mut String, value: &dyn fmt::Debug, spec: &FormatSpec) -> SpecResult {
    check_text_flags(spec)?;

    let text = if spec.alternate {
        format!("{:#?}", value)
    } else {
        format!("{:?}", value)
    };
    pad(out, truncate(&text, spec.precision), spec, Alignment::Left);
    Ok(())
}

/// At most `max` chars of `text`.
fn truncate(text: &str, max: Option<usize>) -> &str {
    match max.and_then(|max| text.char_indices().nth(max)) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn pad(out: &mut String, text: &str, spec: &FormatSpec, default: Alignment) {
    let len = text.chars().count();
    let width = spec.width.unwrap_or(0);
    if len >= width {
        out.push_str(text);
        return;
    }

    let padding = width - len;
    let (before, after) = match spec.alignment.unwrap_or(default) {
        Alignment::Left => (0, padding),
        Alignment::Right => (padding, 0),
        Alignment::Center => (padding / 2, padding - padding / 2),
    };

    out.extend(std::iter::repeat(spec.fill).take(before));
    out.push_str(text);
    out.extend(std::iter::repeat(spec.fill).take(after));
}
