//! Payload format shared by the JSON-emitting providers.

/// Description of the JSON document produced for each article.
///
/// Appended to provider descriptions so operators can see the payload shape.
pub const JSON_FORMAT_DESC: &str = r#"The JSON document has the following shape:

```json
{
  "title": "Article title",
  "text": "Article text description",
  "content": "Article HTML content",
  "link": "Article URL",
  "updated": "Article update date (RFC 3339)",
  "published": "Article publication date (RFC 3339)",
  "author": "Article author",
  "guid": "Article feed GUID",
  "tags": ["list", "of", "tags"],
  "meta": { "key": "value" }
}
```

Empty optional fields are omitted."#;

/// Build a provider description from its mechanism summary.
pub fn with_json_format(summary: &str) -> String {
    format!("{summary}\n\n{JSON_FORMAT_DESC}")
}
