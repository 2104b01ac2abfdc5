//! Photo search API wire types.
//!
//! Mirrors the JSON returned by the Pexels `/v1/search` endpoint. Only the
//! fields the viewer displays are modelled; unknown fields are ignored and
//! missing ones fall back to defaults so a sparse response still decodes.

use serde::{Deserialize, Serialize};

/// Image URLs for each rendition the API offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSrc {
    /// Full-size upload.
    #[serde(default)]
    pub original: String,
    /// Large, doubled for high-DPI screens.
    #[serde(default)]
    pub large2x: String,
    /// Large, 940px tall.
    #[serde(default)]
    pub large: String,
    /// Medium, 350px tall.
    #[serde(default)]
    pub medium: String,
    /// Small, 130px tall.
    #[serde(default)]
    pub small: String,
    /// Cropped to portrait.
    #[serde(default)]
    pub portrait: String,
    /// Cropped to landscape.
    #[serde(default)]
    pub landscape: String,
    /// Thumbnail.
    #[serde(default)]
    pub tiny: String,
}

impl PhotoSrc {
    /// Rendition names paired with their URLs, largest first.
    ///
    /// Empty URLs are skipped.
    pub fn renditions(&self) -> Vec<(&'static str, &str)> {
        [
            ("original", self.original.as_str()),
            ("large2x", self.large2x.as_str()),
            ("large", self.large.as_str()),
            ("medium", self.medium.as_str()),
            ("small", self.small.as_str()),
            ("portrait", self.portrait.as_str()),
            ("landscape", self.landscape.as_str()),
            ("tiny", self.tiny.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .collect()
    }
}

/// A single photo from a search page.
///
/// `ref_index` is not part of the wire format. It is assigned once when the
/// page is stored and gives every photo of one search a unique, increasing,
/// 1-based position across all pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// 1-based position within the current search.
    #[serde(skip)]
    pub ref_index: usize,
    /// Pexels photo id.
    pub id: u64,
    /// Width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Height in pixels.
    #[serde(default)]
    pub height: u32,
    /// Photo page on pexels.com.
    #[serde(default)]
    pub url: String,
    /// Photographer display name.
    #[serde(default)]
    pub photographer: String,
    /// Photographer profile page.
    #[serde(default)]
    pub photographer_url: String,
    /// Photographer id.
    #[serde(default)]
    pub photographer_id: u64,
    /// Average color as `#RRGGBB`.
    #[serde(default)]
    pub avg_color: Option<String>,
    /// Rendition URLs.
    #[serde(default)]
    pub src: PhotoSrc,
    /// Whether the key owner liked the photo.
    #[serde(default)]
    pub liked: bool,
    /// Alt text.
    #[serde(default)]
    pub alt: Option<String>,
}

impl Photo {
    /// "W x H" pixel dimensions.
    pub fn dimensions_label(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }

    /// Short human description: the alt text if present, else the photographer.
    pub fn caption(&self) -> &str {
        match self.alt.as_deref() {
            Some(alt) if !alt.trim().is_empty() => alt,
            _ => &self.photographer,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    /// 1-based page number.
    #[serde(default)]
    pub page: u32,
    /// Page size the server applied.
    #[serde(default)]
    pub per_page: u32,
    /// Photos on this page.
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Total matches for the query.
    #[serde(default)]
    pub total_results: u32,
    /// URL of the next page, absent on the last one.
    #[serde(default)]
    pub next_page: Option<String>,
    /// URL of the previous page.
    #[serde(default)]
    pub prev_page: Option<String>,
}

impl PageResponse {
    /// Whether the API advertised another page after this one.
    ///
    /// An absent, null or empty `next_page` all mean end of input.
    pub fn has_next_page(&self) -> bool {
        self.next_page.as_deref().is_some_and(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r##"{
        "page": 2,
        "per_page": 2,
        "photos": [
            {
                "id": 2014422,
                "width": 3024,
                "height": 3024,
                "url": "https://www.pexels.com/photo/2014422/",
                "photographer": "Joey Farina",
                "photographer_url": "https://www.pexels.com/@joey",
                "photographer_id": 680589,
                "avg_color": "#978E82",
                "src": {
                    "original": "https://images.pexels.com/photos/2014422/a.jpeg",
                    "large2x": "https://images.pexels.com/photos/2014422/b.jpeg",
                    "large": "https://images.pexels.com/photos/2014422/c.jpeg",
                    "medium": "https://images.pexels.com/photos/2014422/d.jpeg",
                    "small": "https://images.pexels.com/photos/2014422/e.jpeg",
                    "portrait": "https://images.pexels.com/photos/2014422/f.jpeg",
                    "landscape": "https://images.pexels.com/photos/2014422/g.jpeg",
                    "tiny": "https://images.pexels.com/photos/2014422/h.jpeg"
                },
                "liked": false,
                "alt": "Brown rocks during golden hour"
            },
            { "id": 7, "photographer": "Someone", "avg_color": null, "alt": "" }
        ],
        "total_results": 8000,
        "next_page": "https://api.pexels.com/v1/search/?page=3&per_page=2&query=nature",
        "prev_page": "https://api.pexels.com/v1/search/?page=1&per_page=2&query=nature"
    }"##;

    #[test]
    fn decodes_full_page() {
        let page: PageResponse = serde_json::from_str(SAMPLE_PAGE).expect("valid page");
        assert_eq!(page.page, 2);
        assert_eq!(page.total_results, 8000);
        assert_eq!(page.photos.len(), 2);
        assert_eq!(page.photos[0].photographer, "Joey Farina");
        assert_eq!(page.photos[0].src.tiny, "https://images.pexels.com/photos/2014422/h.jpeg");
        assert!(page.has_next_page());
    }

    #[test]
    fn ref_index_is_not_read_from_the_wire() {
        let photo: Photo =
            serde_json::from_str(r#"{"id": 1, "ref_index": 99}"#).expect("valid photo");
        assert_eq!(photo.ref_index, 0);
    }

    #[test]
    fn sparse_photo_uses_defaults() {
        let page: PageResponse = serde_json::from_str(SAMPLE_PAGE).expect("valid page");
        let sparse = &page.photos[1];
        assert_eq!(sparse.width, 0);
        assert_eq!(sparse.avg_color, None);
        assert!(sparse.src.renditions().is_empty());
    }

    #[test]
    fn missing_or_empty_next_page_means_end_of_input() {
        let missing: PageResponse = serde_json::from_str(r#"{"photos": []}"#).unwrap();
        assert!(!missing.has_next_page());

        let null: PageResponse = serde_json::from_str(r#"{"next_page": null}"#).unwrap();
        assert!(!null.has_next_page());

        let empty: PageResponse = serde_json::from_str(r#"{"next_page": ""}"#).unwrap();
        assert!(!empty.has_next_page());
    }

    #[test]
    fn caption_prefers_alt_text() {
        let page: PageResponse = serde_json::from_str(SAMPLE_PAGE).unwrap();
        assert_eq!(page.photos[0].caption(), "Brown rocks during golden hour");
        // Blank alt falls back to the photographer
        assert_eq!(page.photos[1].caption(), "Someone");
    }

    #[test]
    fn renditions_are_ordered_largest_first() {
        let page: PageResponse = serde_json::from_str(SAMPLE_PAGE).unwrap();
        let names: Vec<&str> = page.photos[0]
            .src
            .renditions()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec!["original", "large2x", "large", "medium", "small", "portrait", "landscape", "tiny"]
        );
    }

    #[test]
    fn dimensions_label_formats_width_and_height() {
        let photo = Photo {
            width: 640,
            height: 480,
            ..Photo::default()
        };
        assert_eq!(photo.dimensions_label(), "640 x 480");
    }
}
