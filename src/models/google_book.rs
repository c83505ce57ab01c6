//! Google Books volume resource
//!
//! Mirrors the provider's JSON as-is. Values are decoded once at the catalog
//! boundary and only read afterwards; anything the provider may omit is an
//! `Option`.

use serde::{Deserialize, Serialize};

use super::book::Book;

/// `GET /volumes` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeList {
    pub kind: Option<String>,
    #[serde(default)]
    pub total_items: u32,
    /// Absent when the search has no hits
    pub items: Option<Vec<GoogleBook>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleBook {
    pub kind: String,
    pub id: String,
    pub etag: String,
    pub self_link: String,
    pub volume_info: VolumeInfo,
    pub user_info: Option<UserInfo>,
    #[serde(alias = "salesInfo")]
    pub sale_info: Option<SaleInfo>,
    pub access_info: Option<AccessInfo>,
    pub search_info: Option<SearchInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    pub page_count: Option<u32>,
    pub dimensions: Option<Dimensions>,
    pub print_type: Option<String>,
    pub main_category: Option<String>,
    pub categories: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub content_version: Option<String>,
    pub image_links: Option<ImageLinks>,
    pub language: Option<String>,
    pub preview_link: Option<String>,
    pub info_link: String,
    pub canonical_volume_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: Option<String>,
    pub width: Option<String>,
    pub thickness: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub extra_large: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub review: Option<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub kind: String,
    pub id: String,
    pub volume_id: String,
    pub review: String,
    pub rating: f64,
    pub updated: String,
    pub created: String,
    pub reviewer_name: Option<String>,
    pub reviewer_photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInfo {
    pub country: String,
    pub saleability: String,
    pub is_ebook: bool,
    pub list_price: Option<Price>,
    pub retail_price: Option<Price>,
    pub buy_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: f64,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    pub country: String,
    pub viewability: String,
    pub embeddable: bool,
    pub public_domain: bool,
    pub text_to_speech_permission: String,
    pub epub: Option<FormatAvailability>,
    pub pdf: Option<FormatAvailability>,
    pub web_reader_link: Option<String>,
    pub access_view_status: String,
    pub quote_sharing_allowed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatAvailability {
    pub is_available: bool,
    pub acs_token_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInfo {
    pub text_snippet: String,
}

impl From<&GoogleBook> for Book {
    fn from(volume: &GoogleBook) -> Self {
        let info = &volume.volume_info;
        Book {
            id: volume.id.clone(),
            title: info.title.clone(),
            authors: info.authors.clone(),
            description: info.description.clone(),
            thumbnail: info
                .image_links
                .as_ref()
                .and_then(|links| links.thumbnail.clone()),
            info_link: info.info_link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOLUME: &str = r#"{
        "kind": "books#volume",
        "id": "zyTCAlFPjgYC",
        "etag": "f0zKg75Mx/I",
        "selfLink": "https://www.googleapis.com/books/v1/volumes/zyTCAlFPjgYC",
        "volumeInfo": {
            "title": "The Google Story",
            "authors": ["David A. Vise", "Mark Malseed"],
            "publisher": "Random House Digital, Inc.",
            "publishedDate": "2005-11-15",
            "industryIdentifiers": [
                { "type": "ISBN_10", "identifier": "055380457X" },
                { "type": "ISBN_13", "identifier": "9780553804577" }
            ],
            "pageCount": 207,
            "dimensions": { "height": "24.00 cm", "width": "16.03 cm" },
            "averageRating": 3.5,
            "ratingsCount": 136,
            "imageLinks": {
                "smallThumbnail": "https://books.google.com/books?id=zyTCAlFPjgYC&zoom=5",
                "thumbnail": "https://books.google.com/books?id=zyTCAlFPjgYC&zoom=1"
            },
            "language": "en",
            "infoLink": "https://books.google.com/books?id=zyTCAlFPjgYC",
            "canonicalVolumeLink": "https://books.google.com/books/about/The_Google_story.html"
        },
        "saleInfo": {
            "country": "US",
            "saleability": "FOR_SALE",
            "isEbook": true,
            "listPrice": { "amount": 11.99, "currencyCode": "USD" },
            "buyLink": "https://books.google.com/books?id=zyTCAlFPjgYC&buy="
        },
        "accessInfo": {
            "country": "US",
            "viewability": "PARTIAL",
            "embeddable": true,
            "publicDomain": false,
            "textToSpeechPermission": "ALLOWED_FOR_ACCESSIBILITY",
            "epub": { "isAvailable": true, "acsTokenLink": "https://books.google.com/epub" },
            "pdf": { "isAvailable": false },
            "accessViewStatus": "SAMPLE",
            "quoteSharingAllowed": false
        },
        "searchInfo": { "textSnippet": "The Google Story is the definitive account." }
    }"#;

    #[test]
    fn test_decode_volume() {
        let volume: GoogleBook = serde_json::from_str(VOLUME).unwrap();
        let info = &volume.volume_info;
        assert_eq!(info.page_count, Some(207));
        assert_eq!(info.industry_identifiers.as_ref().unwrap()[1].kind, "ISBN_13");
        assert!(info.description.is_none());
        assert!(volume.user_info.is_none());

        let sale = volume.sale_info.as_ref().unwrap();
        assert_eq!(sale.list_price.as_ref().unwrap().currency_code, "USD");
        assert!(sale.retail_price.is_none());
        assert_eq!(
            volume.access_info.as_ref().unwrap().pdf,
            Some(FormatAvailability {
                is_available: false,
                acs_token_link: None
            })
        );
    }

    #[test]
    fn test_project_to_book() {
        let volume: GoogleBook = serde_json::from_str(VOLUME).unwrap();
        let book = Book::from(&volume);
        assert_eq!(book.id, "zyTCAlFPjgYC");
        assert_eq!(book.title, "The Google Story");
        assert_eq!(book.authors.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            book.thumbnail.as_deref(),
            Some("https://books.google.com/books?id=zyTCAlFPjgYC&zoom=1")
        );
        assert_eq!(book.info_link, "https://books.google.com/books?id=zyTCAlFPjgYC");
    }

    #[test]
    fn test_accepts_sales_info_spelling() {
        let text = VOLUME.replace("\"saleInfo\"", "\"salesInfo\"");
        let volume: GoogleBook = serde_json::from_str(&text).unwrap();
        assert_eq!(volume.sale_info.unwrap().saleability, "FOR_SALE");
    }

    #[test]
    fn test_empty_search_has_no_items() {
        let list: VolumeList =
            serde_json::from_str(r#"{ "kind": "books#volumes", "totalItems": 0 }"#).unwrap();
        assert_eq!(list.total_items, 0);
        assert!(list.items.is_none());
    }
}
