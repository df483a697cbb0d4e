//! Scalar replacement values and their canonical JSON text.

use json_splice_util::strings::append_quoted;

use crate::SpliceError;

/// A replacement value, one case per supported kind.
///
/// `Raw` carries pre-encoded JSON text and splices verbatim; everything
/// else is encoded to its canonical form.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Raw(Vec<u8>),
}

impl Scalar {
    /// Canonical JSON text for this value.
    ///
    /// Integers are the shortest decimal form; floats use the shortest
    /// round-trip decimal and must be finite; strings are quoted and
    /// escaped with multi-byte UTF-8 passing through.
    pub fn encode(&self) -> Result<Vec<u8>, SpliceError> {
        let mut out = Vec::new();
        match self {
            Scalar::Null => out.extend_from_slice(b"null"),
            Scalar::Bool(true) => out.extend_from_slice(b"true"),
            Scalar::Bool(false) => out.extend_from_slice(b"false"),
            Scalar::Int(n) => out.extend_from_slice(n.to_string().as_bytes()),
            Scalar::Uint(n) => out.extend_from_slice(n.to_string().as_bytes()),
            Scalar::Float(f) => {
                if !f.is_finite() {
                    return Err(SpliceError::Encode("float is not finite".to_string()));
                }
                out.extend_from_slice(f.to_string().as_bytes());
            }
            Scalar::Str(s) => append_quoted(&mut out, s),
            Scalar::Raw(raw) => out.extend_from_slice(raw),
        }
        Ok(out)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::Uint(v as u64)
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Scalar::Uint(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(v as f64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Scalar::Null,
        }
    }
}
