use std::borrow::Cow;

use smallvec::SmallVec;

/// Read-only view of the request line of an outbound request. Fan-out only
/// ever reads the URI and method, it never touches the request otherwise.
pub trait RequestLine {
    /// The request target exactly as it will be sent.
    fn uri(&self) -> Cow<'_, str>;

    /// The request method, e.g. `GET`.
    fn method(&self) -> Cow<'_, str>;
}

/// A minimal owned request line, for hosts that don't use the `http` types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestDescriptor {
    method: String,
    uri: String,
}

impl RequestDescriptor {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
        }
    }
}

impl RequestLine for RequestDescriptor {
    fn uri(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.uri)
    }

    fn method(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.method)
    }
}

impl<T: RequestLine + ?Sized> RequestLine for &T {
    fn uri(&self) -> Cow<'_, str> {
        (**self).uri()
    }

    fn method(&self) -> Cow<'_, str> {
        (**self).method()
    }
}

#[cfg(feature = "http")]
impl<B> RequestLine for http::Request<B> {
    fn uri(&self) -> Cow<'_, str> {
        Cow::Owned(http::Request::uri(self).to_string())
    }

    fn method(&self) -> Cow<'_, str> {
        Cow::Borrowed(http::Request::method(self).as_str())
    }
}

#[cfg(feature = "http")]
impl RequestLine for http::request::Parts {
    fn uri(&self) -> Cow<'_, str> {
        Cow::Owned(self.uri.to_string())
    }

    fn method(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.method.as_str())
    }
}

/// A caller supplied hierarchical label, coarsest segment first, such as
/// `[service, operation]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MetricId {
    segments: SmallVec<[String; 4]>,
}

impl MetricId {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every non-empty prefix of the id, shortest first. `[a, b]` yields
    /// `[a]` then `[a, b]`.
    pub fn prefixes(&self) -> impl Iterator<Item = &[String]> + '_ {
        (1..=self.segments.len()).map(|len| &self.segments[..len])
    }
}

impl<S: Into<String>> FromIterator<S> for MetricId {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor() {
        let request = RequestDescriptor::new("GET", "/widgets");
        assert_eq!(request.uri(), "/widgets");
        assert_eq!(request.method(), "GET");
        let borrowed = &request;
        assert_eq!(RequestLine::uri(&borrowed), "/widgets");
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_request() {
        let request = http::Request::builder()
            .method(http::Method::POST)
            .uri("/widgets?page=2")
            .body(())
            .unwrap();
        assert_eq!(RequestLine::uri(&request), "/widgets?page=2");
        assert_eq!(RequestLine::method(&request), "POST");

        let (parts, _) = request.into_parts();
        assert_eq!(RequestLine::uri(&parts), "/widgets?page=2");
        assert_eq!(RequestLine::method(&parts), "POST");
    }

    #[test]
    fn prefixes() {
        let id = MetricId::new(["a", "b", "c"]);
        let prefixes: Vec<&[String]> = id.prefixes().collect();
        assert_eq!(prefixes.len(), 3);
        assert_eq!(prefixes[0], ["a"]);
        assert_eq!(prefixes[1], ["a", "b"]);
        assert_eq!(prefixes[2], ["a", "b", "c"]);
    }

    #[test]
    fn empty_id() {
        let id = MetricId::default();
        assert!(id.is_empty());
        assert_eq!(id.prefixes().count(), 0);
        let collected: MetricId = Vec::<String>::new().into_iter().collect();
        assert_eq!(collected, id);
    }
}
