use std::thread;
use std::time::Duration;

use log::{debug, trace};
use reqwest::blocking::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{Book, BookNumber, Chapter, Collection, Hadith, PagedResult};

pub const DEFAULT_ENDPOINT: &str = "https://api.sunnah.com";
pub const DEFAULT_LIMIT: usize = 50;

const API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_WAIT: Duration = Duration::from_millis(500);

/// Blocking client for the sunnah.com API. Holds one connection pool and
/// issues every request sequentially; meant to be driven from a single
/// thread.
#[derive(Clone, Debug)]
pub struct Adaptor {
    endpoint: String,
    api_key: String,
    wait: Duration,
    client: Client,
}

impl Adaptor {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    /// Point the adaptor at a different host (tests, proxies). `endpoint`
    /// is scheme + authority without a trailing slash.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = ClientBuilder::new().timeout(None).build().unwrap();

        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            wait: DEFAULT_WAIT,
            client,
        }
    }

    /// Delay between successive page fetches in the `get_all_*` calls.
    pub fn wait_between_pages(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    fn get_raw(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.endpoint, path);
        trace!("URL: {}", url);

        let res = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .map_err(Error::Transport)?;

        let body = res.text().map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(Error::Decode)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.get_raw(path)?;

        // The remote signals failure inside the body, not the status line.
        if value.get("error").is_some() || value.get("message").is_some() {
            return Err(Error::Api(value));
        }

        serde_json::from_value(value).map_err(Error::Decode)
    }

    fn get_all<T, F>(&self, mut fetch_page: F) -> Result<Vec<T>>
    where
        F: FnMut(usize) -> Result<PagedResult<T>>,
    {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let res = fetch_page(page)?;
            items.extend(res.data);

            match res.next {
                Some(next) => {
                    thread::sleep(self.wait);
                    page = next;
                }
                None => break,
            }
        }

        Ok(items)
    }

    pub fn get_collections(
        &self,
        page: usize,
        limit: usize,
    ) -> Result<PagedResult<Collection>> {
        debug!("get_collections(page={}, limit={})", page, limit);

        self.get(&format!("/v1/collections?limit={}&page={}", limit, page))
    }

    pub fn get_all_collections(&self) -> Result<Vec<Collection>> {
        debug!("get_all_collections");

        self.get_all(|page| self.get_collections(page, DEFAULT_LIMIT))
    }

    pub fn get_collection(&self, name: &str) -> Result<Collection> {
        debug!("get_collection('{}')", name);

        self.get(&format!("/v1/collections/{}", urlencoding::encode(name)))
    }

    pub fn get_books(
        &self,
        collection_name: &str,
        page: usize,
        limit: usize,
    ) -> Result<PagedResult<Book>> {
        debug!("get_books('{}', page={}, limit={})", collection_name, page, limit);

        self.get(&format!(
            "/v1/collections/{}/books?limit={}&page={}",
            urlencoding::encode(collection_name),
            limit,
            page
        ))
    }

    pub fn get_all_books(&self, collection_name: &str) -> Result<Vec<Book>> {
        debug!("get_all_books('{}')", collection_name);

        self.get_all(|page| self.get_books(collection_name, page, DEFAULT_LIMIT))
    }

    pub fn get_book(
        &self,
        collection_name: &str,
        book_number: &BookNumber,
    ) -> Result<Book> {
        debug!("get_book('{}', '{}')", collection_name, book_number);

        self.get(&format!(
            "/v1/collections/{}/books/{}",
            urlencoding::encode(collection_name),
            urlencoding::encode(&book_number.to_string())
        ))
    }

    pub fn get_chapters(
        &self,
        collection_name: &str,
        book_number: &BookNumber,
        page: usize,
        limit: usize,
    ) -> Result<PagedResult<Chapter>> {
        debug!(
            "get_chapters('{}', '{}', page={}, limit={})",
            collection_name, book_number, page, limit
        );

        self.get(&format!(
            "/v1/collections/{}/books/{}/chapters?limit={}&page={}",
            urlencoding::encode(collection_name),
            urlencoding::encode(&book_number.to_string()),
            limit,
            page
        ))
    }

    pub fn get_all_chapters(
        &self,
        collection_name: &str,
        book_number: &BookNumber,
    ) -> Result<Vec<Chapter>> {
        debug!("get_all_chapters('{}', '{}')", collection_name, book_number);

        self.get_all(|page| {
            self.get_chapters(collection_name, book_number, page, DEFAULT_LIMIT)
        })
    }

    pub fn get_hadiths(
        &self,
        collection_name: &str,
        book_number: &BookNumber,
        page: usize,
        limit: usize,
    ) -> Result<PagedResult<Hadith>> {
        debug!(
            "get_hadiths('{}', '{}', page={}, limit={})",
            collection_name, book_number, page, limit
        );

        self.get(&format!(
            "/v1/collections/{}/books/{}/hadiths?limit={}&page={}",
            urlencoding::encode(collection_name),
            urlencoding::encode(&book_number.to_string()),
            limit,
            page
        ))
    }

    pub fn get_all_hadiths(
        &self,
        collection_name: &str,
        book_number: &BookNumber,
    ) -> Result<Vec<Hadith>> {
        debug!("get_all_hadiths('{}', '{}')", collection_name, book_number);

        self.get_all(|page| {
            self.get_hadiths(collection_name, book_number, page, DEFAULT_LIMIT)
        })
    }
}
