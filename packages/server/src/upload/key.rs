use std::path::Path;

use common::storage::ContentHash;

/// Number of hex characters of the content hash kept in object keys.
const HASH_PREFIX_LEN: usize = 10;

/// Lowercase ASCII slug: runs of anything but `[a-z0-9]` become one `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("file");
    }
    slug
}

/// Lowercased extension with its leading dot (`.jpg`), or empty.
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Registered name of a file: everything before the first `.`. Uploads
/// default their display name to it and seeding looks files up by it.
pub fn base_name(file_name: &str) -> &str {
    file_name
        .split_once('.')
        .map_or(file_name, |(base, _)| base)
}

/// Normalize a folder path to `a/b` form; `None` for the root.
pub fn normalize_folder(folder: Option<&str>) -> Option<String> {
    let segments: Vec<&str> = folder?
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// `{slug}_{hash prefix}`, the stored `hash` of a file.
pub fn file_hash(name: &str, hash: &ContentHash) -> String {
    format!("{}_{}", slugify(name).replace('-', "_"), hash.short_hex(HASH_PREFIX_LEN))
}

/// `{folder/}{file hash}{ext}`.
pub fn object_key(folder: Option<&str>, file_hash: &str, ext: &str) -> String {
    match folder {
        Some(folder) => format!("{folder}/{file_hash}{ext}"),
        None => format!("{file_hash}{ext}"),
    }
}
