//! The set of methods a resource accepts.

use std::fmt;

use crate::Method;

/// An ordered list of HTTP methods a resource accepts.
///
/// The list is rendered joined with `", "`, both in the bodies of
/// [`MethodNotAllowedResponder`](crate::MethodNotAllowedResponder) responses
/// and in their `Allow` header. Order and duplicates are kept as given.
///
/// # Examples
///
/// ```
/// use fallback::{AllowedMethods, Method};
///
/// let methods = AllowedMethods::from([Method::GET, Method::POST, Method::PUT]);
/// assert_eq!(methods.to_string(), "GET, POST, PUT");
/// assert_eq!(AllowedMethods::new().to_string(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedMethods {
    methods: Vec<Method>,
}

impl AllowedMethods {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the value of an `Allow` header.
    ///
    /// Tokens are separated by commas and trimmed; empty tokens are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a token is not a valid HTTP method name.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallback::{AllowedMethods, Method};
    ///
    /// let methods = AllowedMethods::from_header_value("GET,HEAD, POST").unwrap();
    /// assert_eq!(methods, AllowedMethods::from([Method::GET, Method::HEAD, Method::POST]));
    /// ```
    pub fn from_header_value(value: &str) -> Result<Self, http::method::InvalidMethod> {
        value
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Method::from_bytes(token.as_bytes()))
            .collect()
    }

    /// Appends a method to the list.
    pub fn push(&mut self, method: Method) -> &mut Self {
        self.methods.push(method);
        self
    }

    /// Returns `true` if `method` is in the list.
    #[must_use]
    pub fn contains(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// Returns an iterator over the methods in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Method> {
        self.methods.iter()
    }

    /// Returns the number of methods in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if no method is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub(crate) fn header_value(&self) -> crate::Result<http::HeaderValue> {
        Ok(http::HeaderValue::try_from(self.to_string())?)
    }
}

impl fmt::Display for AllowedMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(method.as_str())?;
        }
        Ok(())
    }
}

impl From<Vec<Method>> for AllowedMethods {
    fn from(methods: Vec<Method>) -> Self {
        Self { methods }
    }
}

impl<const N: usize> From<[Method; N]> for AllowedMethods {
    fn from(methods: [Method; N]) -> Self {
        Self {
            methods: methods.into(),
        }
    }
}

impl FromIterator<Method> for AllowedMethods {
    fn from_iter<I: IntoIterator<Item = Method>>(iter: I) -> Self {
        Self {
            methods: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AllowedMethods {
    type Item = &'a Method;
    type IntoIter = std::slice::Iter<'a, Method>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for AllowedMethods {
    type Item = Method;
    type IntoIter = std::vec::IntoIter<Method>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.into_iter()
    }
}
