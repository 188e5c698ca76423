//! Type-shape classification shared by the coercer and the projector.
//!
//! Three vocabularies:
//!
//! | Type | Describes | Used by |
//! |------|-----------|---------|
//! | [`Kind`] | runtime family of a value | both sides |
//! | [`Shape`] | destination slot, with bit widths | coercer |
//! | [`WireKind`] | payload shape accepted by storage | projector |
//!
//! Numeric shapes are bridged through text: a source is stringified with
//! [`stringify`] and re-parsed with a bounded parse. Overflow is reported,
//! never wrapped.

use crate::error::ParseFailure;
use crate::timestamp::DbTimestamp;
use crate::value::{DbValue, OpaqueValue, SourceValue, ValueView};
use chrono::{DateTime, Utc};
use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

/// Bit width of an integer destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    /// Width of `isize`/`usize` on the target.
    pub const POINTER: IntWidth = match usize::BITS {
        16 => IntWidth::W16,
        32 => IntWidth::W32,
        _ => IntWidth::W64,
    };

    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }

    pub fn signed_min(self) -> i64 {
        i64::MIN >> (64 - self.bits())
    }

    pub fn signed_max(self) -> i64 {
        i64::MAX >> (64 - self.bits())
    }

    pub fn unsigned_max(self) -> u64 {
        u64::MAX >> (64 - self.bits())
    }

    pub fn contains_signed(self, value: i64) -> bool {
        value >= self.signed_min() && value <= self.signed_max()
    }

    pub fn contains_unsigned(self, value: u64) -> bool {
        value <= self.unsigned_max()
    }

    fn from_bits(bits: &str) -> Option<Self> {
        match bits {
            "8" => Some(IntWidth::W8),
            "16" => Some(IntWidth::W16),
            "32" => Some(IntWidth::W32),
            "64" | "" => Some(IntWidth::W64),
            "size" => Some(IntWidth::POINTER),
            _ => None,
        }
    }
}

/// Bit width of a floating destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    W32,
    W64,
}

impl FloatWidth {
    pub fn bits(self) -> u32 {
        match self {
            FloatWidth::W32 => 32,
            FloatWidth::W64 => 64,
        }
    }
}

/// Destination slot descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    Bool,
    Bytes,
    Text,
    Timestamp,
    /// Accepts any source unconverted.
    Opaque,
    /// Nullable slot holding another shape.
    Pointer(Box<Shape>),
}

impl Shape {
    pub fn pointer_to(inner: Shape) -> Self {
        Shape::Pointer(Box::new(inner))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Shape::Int(_) => Kind::Signed,
            Shape::Uint(_) => Kind::Unsigned,
            Shape::Float(_) => Kind::Float,
            Shape::Bool => Kind::Bool,
            Shape::Bytes => Kind::Bytes,
            Shape::Text => Kind::Text,
            Shape::Timestamp => Kind::Temporal,
            Shape::Opaque => Kind::Opaque,
            Shape::Pointer(_) => Kind::Pointer,
        }
    }

    /// Canonical names of the non-pointer shapes.
    pub fn names() -> &'static [&'static str] {
        &[
            "int8", "int16", "int32", "int64", "uint8", "uint16", "uint32", "uint64", "float32",
            "float64", "bool", "bytes", "text", "timestamp", "opaque",
        ]
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Int(w) => write!(f, "int{}", w.bits()),
            Shape::Uint(w) => write!(f, "uint{}", w.bits()),
            Shape::Float(w) => write!(f, "float{}", w.bits()),
            Shape::Bool => write!(f, "bool"),
            Shape::Bytes => write!(f, "bytes"),
            Shape::Text => write!(f, "text"),
            Shape::Timestamp => write!(f, "timestamp"),
            Shape::Opaque => write!(f, "opaque"),
            Shape::Pointer(inner) => write!(f, "*{}", inner),
        }
    }
}

/// Error returned when a shape name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeParseError {
    message: String,
}

impl ShapeParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ShapeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ShapeParseError {}

impl FromStr for Shape {
    type Err = ShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if let Some(inner) = name.strip_prefix('*') {
            return inner.parse().map(Shape::pointer_to);
        }
        for wrapper in ["ptr<", "option<"] {
            if let Some(rest) = name.strip_prefix(wrapper) {
                let inner = rest
                    .strip_suffix('>')
                    .ok_or_else(|| ShapeParseError::new(format!("Unclosed shape: {}", s)))?;
                return inner.parse().map(Shape::pointer_to);
            }
        }

        let shape = match name.as_str() {
            "bool" | "boolean" => Shape::Bool,
            "bytes" | "blob" | "binary" => Shape::Bytes,
            "text" | "string" | "str" => Shape::Text,
            "timestamp" | "time" | "datetime" => Shape::Timestamp,
            "opaque" | "any" => Shape::Opaque,
            "float32" | "f32" | "real32" => Shape::Float(FloatWidth::W32),
            "float64" | "f64" | "real" | "double" => Shape::Float(FloatWidth::W64),
            other => {
                let (unsigned, bits) = if let Some(bits) = other.strip_prefix("uint") {
                    (true, bits)
                } else if let Some(bits) = other.strip_prefix('u') {
                    (true, bits)
                } else if let Some(bits) = other.strip_prefix("int") {
                    (false, bits)
                } else if let Some(bits) = other.strip_prefix('i') {
                    (false, bits)
                } else {
                    return Err(ShapeParseError::new(format!("Unknown shape: {}", s)));
                };
                let width = IntWidth::from_bits(bits)
                    .ok_or_else(|| ShapeParseError::new(format!("Unknown shape: {}", s)))?;
                if unsigned {
                    Shape::Uint(width)
                } else {
                    Shape::Int(width)
                }
            }
        };
        Ok(shape)
    }
}

/// Runtime family of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Signed,
    Unsigned,
    Float,
    Bool,
    Bytes,
    Text,
    Temporal,
    Pointer,
    Opaque,
}

impl Kind {
    /// Families that stringify to a decimal or boolean literal.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Signed | Kind::Unsigned | Kind::Float | Kind::Bool)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Null => write!(f, "null"),
            Kind::Signed => write!(f, "integer"),
            Kind::Unsigned => write!(f, "unsigned"),
            Kind::Float => write!(f, "float"),
            Kind::Bool => write!(f, "boolean"),
            Kind::Bytes => write!(f, "bytes"),
            Kind::Text => write!(f, "text"),
            Kind::Temporal => write!(f, "timestamp"),
            Kind::Pointer => write!(f, "pointer"),
            Kind::Opaque => write!(f, "opaque"),
        }
    }
}

/// Payload shape accepted by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Null,
    Integer,
    Real,
    Boolean,
    Blob,
    Text,
    Timestamp,
    Opaque,
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireKind::Null => write!(f, "null"),
            WireKind::Integer => write!(f, "integer"),
            WireKind::Real => write!(f, "real"),
            WireKind::Boolean => write!(f, "boolean"),
            WireKind::Blob => write!(f, "blob"),
            WireKind::Text => write!(f, "text"),
            WireKind::Timestamp => write!(f, "timestamp"),
            WireKind::Opaque => write!(f, "opaque"),
        }
    }
}

/// Order in which the projector tries widening targets.
pub const WIDENING_ORDER: [WireKind; 6] = [
    WireKind::Integer,
    WireKind::Real,
    WireKind::Boolean,
    WireKind::Blob,
    WireKind::Text,
    WireKind::Timestamp,
];

pub fn classify(value: &SourceValue<'_>) -> Kind {
    match value {
        SourceValue::Null => Kind::Null,
        SourceValue::Integer(_) => Kind::Signed,
        SourceValue::Unsigned(_) => Kind::Unsigned,
        SourceValue::Real(_) | SourceValue::Real32(_) => Kind::Float,
        SourceValue::Boolean(_) => Kind::Bool,
        SourceValue::Text(_) => Kind::Text,
        SourceValue::Blob(_) => Kind::Bytes,
        SourceValue::Timestamp(_) => Kind::Temporal,
        SourceValue::Opaque(_) => Kind::Opaque,
    }
}

/// Textual form of a source value, as fed to the bounded parses.
///
/// Integers print in decimal, floats in [`format_float`] form at their own
/// precision, booleans as `true`/`false`.
/// Bytes decode as UTF-8, replacing invalid sequences. `None` for null and
/// opaque sources.
pub fn stringify(value: &SourceValue<'_>) -> Option<String> {
    match *value {
        SourceValue::Text(s) => Some(s.to_owned()),
        SourceValue::Blob(b) => Some(String::from_utf8_lossy(b).into_owned()),
        SourceValue::Integer(v) => Some(v.to_string()),
        SourceValue::Unsigned(v) => Some(v.to_string()),
        SourceValue::Real(v) => Some(format_float(v, format!("{:e}", v))),
        SourceValue::Real32(v) => Some(format_float(f64::from(v), format!("{:e}", v))),
        SourceValue::Boolean(v) => Some(v.to_string()),
        SourceValue::Timestamp(ts) => Some(ts.to_rfc3339()),
        SourceValue::Null | SourceValue::Opaque(_) => None,
    }
}

/// Shortest round-trip digits in general (`%g`) layout.
///
/// `sci` is the value's shortest `{:e}` rendering at its own precision.
/// Decimal exponents below -4 or at least 6 use exponent form with a signed
/// two-digit minimum exponent (`1e+06`, `1.5e-07`); the rest are
/// positional. Non-finite values print as `NaN`, `+Inf` and `-Inf`.
fn format_float(value: f64, sci: String) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "+Inf" } else { "-Inf" };
        return text.to_string();
    }

    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs());
    }

    let (neg, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = unsigned.chars().filter(|c| *c != '.').collect();
    let mut out = String::with_capacity(digits.len() + 8);
    if neg {
        out.push('-');
    }
    if exp < 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-exp - 1) as usize));
        out.push_str(&digits);
    } else {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            out.push_str(&digits);
            out.extend(std::iter::repeat('0').take(int_len - digits.len()));
        } else {
            out.push_str(&digits[..int_len]);
            out.push('.');
            out.push_str(&digits[int_len..]);
        }
    }
    out
}

fn int_failure(err: ParseIntError) -> ParseFailure {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseFailure::OutOfRange,
        _ => ParseFailure::InvalidSyntax,
    }
}

/// Parse a base-10 signed integer that must fit in `width`.
pub fn parse_signed(text: &str, width: IntWidth) -> Result<i64, ParseFailure> {
    let value = text.parse::<i64>().map_err(int_failure)?;
    if width.contains_signed(value) {
        Ok(value)
    } else {
        Err(ParseFailure::OutOfRange)
    }
}

/// Parse a base-10 unsigned integer that must fit in `width`.
pub fn parse_unsigned(text: &str, width: IntWidth) -> Result<u64, ParseFailure> {
    let value = text.parse::<u64>().map_err(int_failure)?;
    if width.contains_unsigned(value) {
        Ok(value)
    } else {
        Err(ParseFailure::OutOfRange)
    }
}

/// Parse a float at the given precision.
///
/// A finite literal that overflows to infinity is out of range; an explicit
/// `inf`/`infinity` literal is accepted.
pub fn parse_float(text: &str, width: FloatWidth) -> Result<f64, ParseFailure> {
    let parsed = match width {
        FloatWidth::W32 => text.parse::<f32>().map(f64::from),
        FloatWidth::W64 => text.parse::<f64>(),
    };
    let value = parsed.map_err(|_| ParseFailure::InvalidSyntax)?;
    if value.is_infinite() && !names_infinity(text) {
        return Err(ParseFailure::OutOfRange);
    }
    Ok(value)
}

fn names_infinity(text: &str) -> bool {
    text.trim_start_matches(|c| c == '+' || c == '-')
        .to_ascii_lowercase()
        .starts_with("inf")
}

fn parse_bool(text: &str) -> Result<bool, ParseFailure> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseFailure::InvalidSyntax),
    }
}

/// The storage boundary's canonical boolean conversion.
///
/// Returns `None` when the source family is never boolean-convertible
/// (null, floats, timestamps, opaque values).
pub fn canonical_bool(value: &SourceValue<'_>) -> Option<Result<bool, ParseFailure>> {
    match *value {
        SourceValue::Boolean(v) => Some(Ok(v)),
        SourceValue::Text(s) => Some(parse_bool(s)),
        SourceValue::Blob(b) => Some(
            std::str::from_utf8(b)
                .map_err(|_| ParseFailure::InvalidSyntax)
                .and_then(parse_bool),
        ),
        SourceValue::Integer(v) => Some(match v {
            1 => Ok(true),
            0 => Ok(false),
            _ => Err(ParseFailure::OutOfRange),
        }),
        SourceValue::Unsigned(v) => Some(match v {
            1 => Ok(true),
            0 => Ok(false),
            _ => Err(ParseFailure::OutOfRange),
        }),
        SourceValue::Null
        | SourceValue::Real(_)
        | SourceValue::Real32(_)
        | SourceValue::Timestamp(_)
        | SourceValue::Opaque(_) => None,
    }
}

/// Whether a value of `from` family can widen into `to` without loss.
///
/// Opaque values may widen into any payload; whether one actually does is
/// decided by [`widen`] from the wrapped type.
pub fn can_widen(from: Kind, to: WireKind) -> bool {
    matches!(
        (from, to),
        (Kind::Signed, WireKind::Integer)
            | (Kind::Unsigned, WireKind::Integer)
            | (Kind::Float, WireKind::Real)
            | (Kind::Bool, WireKind::Boolean)
            | (Kind::Bytes, WireKind::Blob)
            | (Kind::Bytes, WireKind::Text)
            | (Kind::Text, WireKind::Text)
            | (Kind::Text, WireKind::Blob)
            | (Kind::Temporal, WireKind::Timestamp)
            | (Kind::Null, WireKind::Null)
    ) || (from == Kind::Opaque && to != WireKind::Null)
}

/// Widen a value into the payload shape `to`.
///
/// `None` if the pair cannot widen or the value does not fit (an unsigned
/// value above `i64::MAX`). Opaque values widen when they wrap a primitive
/// of the target family.
pub fn widen(value: &ValueView<'_>, to: WireKind) -> Option<DbValue> {
    match (value, to) {
        (ValueView::Signed(v), WireKind::Integer) => Some(DbValue::Integer(*v)),
        (ValueView::Unsigned(v), WireKind::Integer) => i64::try_from(*v).ok().map(DbValue::Integer),
        (ValueView::Float(v), WireKind::Real) => Some(DbValue::Real(*v)),
        (ValueView::Bool(v), WireKind::Boolean) => Some(DbValue::Boolean(*v)),
        (ValueView::Bytes(v), WireKind::Blob) => Some(DbValue::Blob(v.to_vec())),
        (ValueView::Bytes(v), WireKind::Text) => {
            Some(DbValue::Text(String::from_utf8_lossy(v).into_owned()))
        }
        (ValueView::Text(v), WireKind::Text) => Some(DbValue::Text((*v).to_owned())),
        (ValueView::Text(v), WireKind::Blob) => Some(DbValue::Blob(v.as_bytes().to_vec())),
        (ValueView::Timestamp(v), WireKind::Timestamp) => Some(DbValue::Timestamp(*v)),
        (ValueView::Opaque(v), WireKind::Opaque) => Some(DbValue::Opaque(v.clone())),
        (ValueView::Opaque(v), to) => widen_opaque(v, to),
        (ValueView::Null, WireKind::Null) => Some(DbValue::Null),
        _ => None,
    }
}

fn widen_opaque(value: &OpaqueValue, to: WireKind) -> Option<DbValue> {
    macro_rules! integer_of {
        ($($ty:ty),*) => {
            $(
                if let Some(v) = value.downcast_ref::<$ty>() {
                    return i64::try_from(*v).ok().map(DbValue::Integer);
                }
            )*
        };
    }

    match to {
        WireKind::Integer => {
            integer_of!(i64, i32, i16, i8, isize, u64, u32, u16, u8, usize);
            None
        }
        WireKind::Real => value
            .downcast_ref::<f64>()
            .copied()
            .or_else(|| value.downcast_ref::<f32>().map(|v| f64::from(*v)))
            .map(DbValue::Real),
        WireKind::Boolean => value.downcast_ref::<bool>().map(|v| DbValue::Boolean(*v)),
        WireKind::Blob => value
            .downcast_ref::<Vec<u8>>()
            .map(|v| DbValue::Blob(v.clone())),
        WireKind::Text => value
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| value.downcast_ref::<&'static str>().map(|v| v.to_string()))
            .map(DbValue::Text),
        WireKind::Timestamp => value
            .downcast_ref::<DbTimestamp>()
            .copied()
            .or_else(|| value.downcast_ref::<DateTime<Utc>>().map(|v| DbTimestamp::from(*v)))
            .map(DbValue::Timestamp),
        WireKind::Opaque | WireKind::Null => None,
    }
}
