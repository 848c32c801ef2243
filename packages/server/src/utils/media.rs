use common::UrlRewriter;
use serde_json::Value;

/// Rewrite the `url` of every media object inside `value` through `urls`.
///
/// A media object is any JSON object carrying both a string `url` and a
/// `mime` field. Nested objects and arrays are walked as well.
pub fn rewrite_media_urls(urls: &UrlRewriter, value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("mime")
                && let Some(Value::String(url)) = map.get_mut("url")
            {
                *url = urls.rewrite(url);
            }
            for child in map.values_mut() {
                rewrite_media_urls(urls, child);
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_media_urls(urls, item);
            }
        }
        _ => {}
    }
}
