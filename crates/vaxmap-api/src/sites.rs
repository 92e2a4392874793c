// Site endpoints
//
// The backend exposes exactly two reads: the unfiltered initial map and
// the location search. Neither is paginated.

use tracing::debug;

use crate::client::SiteClient;
use crate::error::Error;
use crate::models::{RawSite, SearchQuery, SearchResponse};

impl SiteClient {
    /// Fetch every known site for the unfiltered initial view.
    ///
    /// `GET /initmap`
    pub async fn initmap(&self) -> Result<Vec<RawSite>, Error> {
        let url = self.endpoint_url("initmap")?;
        debug!("fetching initial map sites");
        self.get(url).await
    }

    /// Search sites around an address or coordinates.
    ///
    /// `POST /search_query_location` with the query as JSON body.
    pub async fn search_query_location(&self, query: &SearchQuery) -> Result<SearchResponse, Error> {
        let url = self.endpoint_url("search_query_location")?;
        debug!(
            address = ?query.address,
            latitude = ?query.latitude,
            longitude = ?query.longitude,
            "searching sites by location"
        );
        self.post(url, query).await
    }
}
