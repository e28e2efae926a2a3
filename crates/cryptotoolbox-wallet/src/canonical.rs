//! Canonical JSON encoding used as the exact HMAC input.
//!
//! The encoding guarantees:
//!
//! - **Sorted keys**: object keys in code-point order, recursively.
//! - **No whitespace**: `,` and `:` separators only.
//! - **ASCII only**: every non-ASCII character (and DEL) is written as a
//!   `\uXXXX` escape, astral characters as a UTF-16 surrogate pair.
//!
//! Strings, booleans, null, arrays and integers encode byte-for-byte like
//! any sorted-key, compact, ASCII-escaping JSON encoder, so envelopes from
//! other tools using that convention verify here. Floats are not
//! guaranteed to match (the shortest-repr algorithms differ).

use std::io;

use cryptotoolbox_types::{Result, ToolboxError};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Wraps a layout formatter and escapes everything outside printable ASCII.
///
/// serde_json already escapes quotes, backslashes and C0 controls before
/// handing string fragments to the formatter; the remaining characters
/// are handled here. Layout (whitespace, indentation) is delegated.
struct AsciiEscaping<F>(F);

impl<F: Formatter> Formatter for AsciiEscaping<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;

        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }
            writer.write_all(&bytes[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                writer.write_all(format!("\\u{unit:04x}").as_bytes())?;
            }
            start = i + ch.len_utf8();
        }

        writer.write_all(&bytes[start..])
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Serializes any value to canonical JSON bytes.
///
/// # Errors
///
/// Returns [`ToolboxError::MalformedInput`] if the value cannot be
/// represented as JSON (e.g. a map with non-string keys).
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let value = serde_json::to_value(value).map_err(|e| ToolboxError::MalformedInput {
        reason: format!("value is not representable as JSON: {e}"),
    })?;
    canonicalize_value(&value)
}

/// Serializes an already-parsed JSON value to canonical JSON bytes.
pub fn canonicalize_value(value: &Value) -> Result<Vec<u8>> {
    let sorted = sort_keys(value);

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, AsciiEscaping(CompactFormatter));
    sorted
        .serialize(&mut serializer)
        .map_err(|e| ToolboxError::MalformedInput {
            reason: format!("canonical JSON serialization failed: {e}"),
        })?;

    Ok(buf)
}

/// Serializes `value` as 2-space indented JSON with the same ASCII
/// escaping as the canonical form. Field order is left as declared.
///
/// Used for the human-facing envelope file, not as MAC input.
pub fn to_ascii_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, AsciiEscaping(PrettyFormatter::new()));
    value
        .serialize(&mut serializer)
        .map_err(|e| ToolboxError::MalformedInput {
            reason: format!("JSON serialization failed: {e}"),
        })?;

    String::from_utf8(buf).map_err(|e| ToolboxError::MalformedInput {
        reason: format!("JSON output is not UTF-8: {e}"),
    })
}

/// Rebuilds `value` with every object's keys inserted in sorted order.
///
/// Makes the output independent of whether serde_json's map keeps
/// insertion order or sorts on its own.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
