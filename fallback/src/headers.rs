pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
pub(crate) const APPLICATION_XML_CONTENT_TYPE: &str = "application/xml";
pub(crate) const TEXT_XML_CONTENT_TYPE: &str = "text/xml";
pub(crate) const HTML_CONTENT_TYPE: &str = "text/html";
pub(crate) const PLAIN_TEXT_CONTENT_TYPE: &str = "text/plain";
