/// API module for talking to PokeAPI
///
/// This module provides the HTTP seam (`HttpGet`), the blocking `ureq`
/// transport used in production, and the client that builds list/detail URLs
/// and decodes their bodies.
use crate::error::FetchError;
use crate::types::{DetailRecord, ListingEntry, ListingPage};
use log::debug;
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("pokedex-report/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed request, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A blocking GET capability
///
/// `Err` is reserved for transport failures (DNS, connect, TLS, read);
/// HTTP error statuses come back as `Ok` with the status set.
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<HttpResponse, String>;
}

/// Production transport backed by a shared `ureq` agent
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        UreqTransport { agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build() }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpGet for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, String> {
        match self.agent.get(url).call() {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string().map_err(|e| e.to_string())?;
                Ok(HttpResponse { status, body })
            }
            // ureq turns 4xx/5xx into errors; hand them back as plain responses
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Transport(t)) => Err(t.to_string()),
        }
    }
}

/// Client for the two PokeAPI endpoint shapes used by the extractor
pub struct PokeApiClient<H: HttpGet> {
    http: H,
    base_url: String,
}

impl<H: HttpGet> PokeApiClient<H> {
    pub fn new(http: H, base_url: &str) -> Self {
        PokeApiClient { http, base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &H {
        &self.http
    }

    /// `{base}/pokemon?limit={limit}&offset={offset}`
    pub fn listing_url(&self, limit: u32, offset: u32) -> String {
        format!("{}/pokemon?limit={}&offset={}", self.base_url, limit, offset)
    }

    /// `{base}/pokemon/{id}`
    pub fn detail_url(&self, id: i64) -> String {
        format!("{}/pokemon/{}", self.base_url, id)
    }

    /// Fetch one listing page and return its entries (empty if `results` is absent)
    pub fn fetch_listing(&self, limit: u32, offset: u32) -> Result<Vec<ListingEntry>, FetchError> {
        Ok(self.fetch_listing_page(limit, offset)?.results)
    }

    fn fetch_listing_page(&self, limit: u32, offset: u32) -> Result<ListingPage, FetchError> {
        let url = self.listing_url(limit, offset);
        debug!("fetching listing page limit={} offset={}", limit, offset);
        self.get_json(&url)
    }

    /// Gather up to `limit` entries starting at `offset`, `page_size` at a time
    ///
    /// Stops early when a page comes back short or the listing has no next
    /// page. Any page failure fails the whole listing.
    pub fn fetch_listing_pages(&self, limit: u32, offset: u32, page_size: u32) -> Result<Vec<ListingEntry>, FetchError> {
        if page_size >= limit {
            return self.fetch_listing(limit, offset);
        }

        let page_size = page_size.max(1);
        let mut entries = Vec::new();
        let mut next_offset = offset;

        while (entries.len() as u64) < u64::from(limit) {
            let remaining = limit - entries.len() as u32;
            let request = remaining.min(page_size);

            let page = self.fetch_listing_page(request, next_offset)?;
            let got = page.results.len();
            debug!("got {} listing entries at offset {}", got, next_offset);
            entries.extend(page.results);

            if got < request as usize || page.next.is_none() {
                break;
            }
            next_offset = next_offset.saturating_add(request);
        }

        entries.truncate(limit as usize);
        Ok(entries)
    }

    /// Fetch the detail record for one id
    pub fn fetch_detail(&self, id: i64) -> Result<DetailRecord, FetchError> {
        let url = self.detail_url(id);
        debug!("fetching details for {}", id);
        self.get_json(&url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let resp = self
            .http
            .get(url)
            .map_err(|message| FetchError::Transport { url: url.to_string(), message })?;

        if !resp.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: resp.status });
        }

        serde_json::from_str(&resp.body).map_err(|e| FetchError::Decode { url: url.to_string(), message: e.to_string() })
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{FakeHttp, listing_json};
    use super::*;

    const BASE: &str = "https://pokeapi.co/api/v2";

    #[test]
    fn test_listing_url_shape() {
        let client = PokeApiClient::new(FakeHttp::new(), "https://pokeapi.co/api/v2/");
        assert_eq!(client.listing_url(2, 0), "https://pokeapi.co/api/v2/pokemon?limit=2&offset=0");
        assert_eq!(client.detail_url(25), "https://pokeapi.co/api/v2/pokemon/25");
    }

    #[test]
    fn test_fetch_listing_returns_results() {
        let url = format!("{}/pokemon?limit=2&offset=0", BASE);
        let http = FakeHttp::new().ok(&url, &listing_json(BASE, &[("bulbasaur", 1), ("ivysaur", 2)], None));
        let client = PokeApiClient::new(http, BASE);

        let entries = client.fetch_listing(2, 0).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "bulbasaur");
        assert_eq!(entries[1].url, "https://pokeapi.co/api/v2/pokemon/2/");
        assert_eq!(client.http.calls(), vec![url]);
    }

    #[test]
    fn test_fetch_listing_pagination_params() {
        for (limit, offset) in [(100, 0), (50, 50), (200, 0)] {
            let url = format!("{}/pokemon?limit={}&offset={}", BASE, limit, offset);
            let http = FakeHttp::new().ok(&url, "{\"results\": []}");
            let client = PokeApiClient::new(http, BASE);
            client.fetch_listing(limit, offset).unwrap();
            assert_eq!(client.http.calls(), vec![url]);
        }
    }

    #[test]
    fn test_fetch_listing_missing_results_is_empty() {
        let url = format!("{}/pokemon?limit=5&offset=0", BASE);
        let client = PokeApiClient::new(FakeHttp::new().ok(&url, "{\"count\": 0}"), BASE);
        assert!(client.fetch_listing(5, 0).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_listing_error_status() {
        let url = format!("{}/pokemon?limit=5&offset=0", BASE);
        let client = PokeApiClient::new(FakeHttp::new().status(&url, 500), BASE);
        match client.fetch_listing(5, 0) {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_detail_transport_failure() {
        let url = format!("{}/pokemon/25", BASE);
        let client = PokeApiClient::new(FakeHttp::new().fail(&url, "API Error"), BASE);
        match client.fetch_detail(25) {
            Err(FetchError::Transport { message, .. }) => assert_eq!(message, "API Error"),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_detail_decodes_consumed_fields() {
        let url = format!("{}/pokemon/25", BASE);
        let body = r#"{"id": 25, "name": "pikachu", "base_experience": 112, "height": 4,
            "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}],
            "stats": [{"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": ""}}]}"#;
        let client = PokeApiClient::new(FakeHttp::new().ok(&url, body), BASE);

        let detail = client.fetch_detail(25).unwrap();
        assert_eq!(detail.name, "pikachu");
        assert_eq!(detail.base_experience, Some(112));
        assert_eq!(detail.types[0].kind.name, "electric");
        assert_eq!(detail.stats[0].base_stat, 35);
    }

    #[test]
    fn test_fetch_detail_bad_json_is_decode_error() {
        let url = format!("{}/pokemon/25", BASE);
        let client = PokeApiClient::new(FakeHttp::new().ok(&url, "<html>"), BASE);
        assert!(matches!(client.fetch_detail(25), Err(FetchError::Decode { .. })));
    }

    #[test]
    fn test_fetch_listing_pages_walks_offsets() {
        let p1 = format!("{}/pokemon?limit=2&offset=10", BASE);
        let p2 = format!("{}/pokemon?limit=2&offset=12", BASE);
        let p3 = format!("{}/pokemon?limit=1&offset=14", BASE);
        let http = FakeHttp::new()
            .ok(&p1, &listing_json(BASE, &[("a", 11), ("b", 12)], Some("more")))
            .ok(&p2, &listing_json(BASE, &[("c", 13), ("d", 14)], Some("more")))
            .ok(&p3, &listing_json(BASE, &[("e", 15)], Some("more")));
        let client = PokeApiClient::new(http, BASE);

        let entries = client.fetch_listing_pages(5, 10, 2).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(client.http.calls(), vec![p1, p2, p3]);
    }

    #[test]
    fn test_fetch_listing_pages_stops_at_last_page() {
        let p1 = format!("{}/pokemon?limit=3&offset=0", BASE);
        let http = FakeHttp::new().ok(&p1, &listing_json(BASE, &[("a", 1), ("b", 2)], None));
        let client = PokeApiClient::new(http, BASE);

        let entries = client.fetch_listing_pages(10, 0, 3).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(client.http.calls().len(), 1);
    }

    #[test]
    fn test_fetch_listing_pages_single_request_when_page_covers_limit() {
        let url = format!("{}/pokemon?limit=100&offset=0", BASE);
        let http = FakeHttp::new().ok(&url, &listing_json(BASE, &[("a", 1)], Some("more")));
        let client = PokeApiClient::new(http, BASE);

        client.fetch_listing_pages(100, 0, 100).unwrap();
        assert_eq!(client.http.calls(), vec![url]);
    }

    #[test]
    fn test_fetch_listing_pages_propagates_failure() {
        let p1 = format!("{}/pokemon?limit=1&offset=0", BASE);
        let http = FakeHttp::new().ok(&p1, &listing_json(BASE, &[("a", 1)], Some("more")));
        let client = PokeApiClient::new(http, BASE);

        // second page is unrouted -> 404
        assert!(matches!(client.fetch_listing_pages(2, 0, 1), Err(FetchError::Status { status: 404, .. })));
    }
}
