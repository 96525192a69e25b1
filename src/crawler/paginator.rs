//! Sequential walk over a user's photo feed
//!
//! The walk starts from the profile page, then repeatedly asks the
//! next-page endpoint for the entries after the last seen cursor. Each
//! page's cursor depends on the previous page, so pages are fetched one at
//! a time.
//!
//! # States
//!
//! | From | Event | To |
//! |------|-------|----|
//! | Start | profile fetch fails or has no user id | Aborted |
//! | Start | profile page has no entries | Done |
//! | Start | profile page seeded | Walking |
//! | Walking | next-page fetch or decode fails | Aborted |
//! | Walking | payload `data` is empty, or fragment has no entries | Done |
//! | Walking | fragment extracted | Walking |

use crate::crawler::extractor::PageExtractor;
use crate::crawler::parser::{extract_user_id, parse_next_page, NextPage};
use crate::crawler::{fetch_url, fetch_url_with_query, FetchResult};
use crate::download::WorkQueue;
use crate::state::CrawlState;
use crate::{Result, RippleError};
use reqwest::Client;

/// Path of the endpoint serving further feed pages
pub const NEXT_PAGE_PATH: &str = "/show_block.php";

/// A user's resolved profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,

    /// Numeric id the next-page endpoint expects
    pub internal_id: String,
}

/// The fetched profile page and the identity resolved from it
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub profile: UserProfile,

    /// Raw HTML, holding the first block of gallery entries
    pub html: String,
}

/// Drives the page walk and tracks its state
pub struct Paginator {
    client: Client,
    base_url: String,
    extractor: PageExtractor,
    state: CrawlState,
    pages: usize,
    items: usize,
}

impl Paginator {
    /// Creates a paginator for the site at `base_url`
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let extractor = PageExtractor::new(client.clone(), &base_url)?;

        Ok(Self {
            client,
            base_url,
            extractor,
            state: CrawlState::Start,
            pages: 0,
            items: 0,
        })
    }

    /// Current state of the walk
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Number of pages extracted so far, including the profile page
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Number of work items queued so far
    pub fn items(&self) -> usize {
        self.items
    }

    /// URL of a user's profile page
    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}", self.base_url, username)
    }

    /// Fetches the profile page and resolves the user's internal id
    ///
    /// Both failures are fatal for the run and move the walk to `Aborted`.
    ///
    /// # Returns
    ///
    /// * `Ok(ProfilePage)` - The page and the resolved profile
    /// * `Err(RippleError::ProfileUnavailable)` - The profile page could not be fetched
    /// * `Err(RippleError::MissingUserId)` - The page has no RSS feed link
    pub async fn open_profile(&mut self, username: &str) -> Result<ProfilePage> {
        let url = self.profile_url(username);
        tracing::info!("Fetching profile page {}", url);

        let html = match fetch_url(&self.client, &url).await {
            FetchResult::Success { body, .. } => String::from_utf8_lossy(&body).into_owned(),
            failure => {
                self.transition(CrawlState::Aborted)?;
                return Err(RippleError::ProfileUnavailable {
                    url,
                    reason: failure.describe(),
                });
            }
        };

        let Some(internal_id) = extract_user_id(&html, &self.base_url) else {
            self.transition(CrawlState::Aborted)?;
            return Err(RippleError::MissingUserId {
                username: username.to_string(),
            });
        };

        tracing::info!("Resolved user '{}' to id {}", username, internal_id);

        Ok(ProfilePage {
            profile: UserProfile {
                username: username.to_string(),
                internal_id,
            },
            html,
        })
    }

    /// Walks the feed from the profile page to its end, queueing every photo
    ///
    /// Returns the terminal state: `Done` when the server reported no more
    /// data, `Aborted` when a page request failed. Failed page requests are
    /// not retried.
    pub async fn walk(&mut self, page: &ProfilePage, queue: &WorkQueue) -> Result<CrawlState> {
        let mut cursor = match self.extract(&page.html, queue).await {
            Some(cursor) => cursor,
            None => {
                tracing::info!("Profile page has no photos");
                self.transition(CrawlState::Done)?;
                return Ok(self.state);
            }
        };
        self.transition(CrawlState::Walking)?;

        while self.state == CrawlState::Walking {
            let next = match self.fetch_next_page(&cursor, &page.profile.internal_id).await {
                Ok(next) => next,
                Err(reason) => {
                    tracing::error!("Failed to fetch next page - {}, aborting.", reason);
                    self.transition(CrawlState::Aborted)?;
                    break;
                }
            };

            if next.is_end() {
                tracing::debug!("No more data after cursor {}", cursor);
                self.transition(CrawlState::Done)?;
                break;
            }

            match self.extract(&next.data, queue).await {
                Some(next_cursor) => {
                    cursor = next_cursor;
                    self.transition(CrawlState::Walking)?;
                }
                None => {
                    tracing::debug!("Next page after cursor {} has no entries", cursor);
                    self.transition(CrawlState::Done)?;
                }
            }
        }

        tracing::info!(
            "Feed walk {}: {} pages, {} photos queued",
            self.state,
            self.pages,
            self.items
        );
        Ok(self.state)
    }

    async fn extract(&mut self, html: &str, queue: &WorkQueue) -> Option<String> {
        let extraction = self.extractor.extract(html, queue).await;
        self.pages += 1;
        self.items += extraction.items;
        tracing::info!(
            "Page {}: {} entries, {} photos queued",
            self.pages,
            extraction.entries,
            extraction.items
        );
        extraction.cursor
    }

    /// Requests the page after `cursor`; the error is a description for logs
    async fn fetch_next_page(
        &self,
        cursor: &str,
        user_id: &str,
    ) -> std::result::Result<NextPage, String> {
        let url = format!("{}{}", self.base_url, NEXT_PAGE_PATH);
        let query = [
            ("type", "getNextPageData"),
            ("page", "photoUser"),
            ("lastId", cursor),
            ("user_id", user_id),
        ];

        let body = match fetch_url_with_query(&self.client, &url, &query).await {
            FetchResult::Success { body, .. } => body,
            failure => return Err(failure.describe()),
        };

        parse_next_page(&String::from_utf8_lossy(&body))
            .map_err(|e| format!("invalid payload: {}", e))
    }

    fn transition(&mut self, next: CrawlState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(RippleError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("Crawl state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}
