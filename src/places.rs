use color_eyre::eyre::{eyre, Result};
use tracing::{info, instrument};

use crate::{
    clients::get_reqwest_client,
    types::{
        dto::remote::RemoteError,
        place::{Place, Query},
    },
};

/// Client for the remote "nearby places" endpoint
#[derive(Debug, Clone)]
pub struct PlaceService {
    base_url: String,
}

impl PlaceService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[instrument(skip(self), fields(url = %self.base_url))]
    pub async fn nearby(&self, query: &Query) -> Result<Vec<Place>> {
        let response = get_reqwest_client()
            .get(&self.base_url)
            .query(&query.params())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            // The body is only read for a message, anything unexpected in it is ignored
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<RemoteError>(&body)
                .ok()
                .and_then(|err| err.message)
            {
                Some(message) => eyre!("remote service responded {status}: {message}"),
                None => eyre!("remote service responded {status}"),
            });
        }
        let places = response.json::<Vec<Place>>().await?;
        info!("received {} places", places.len());
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    fn query() -> Query {
        Query {
            latitude: 10.0,
            longitude: 20.0,
            radius: 5.0,
        }
    }

    #[tokio::test]
    async fn sends_query_parameters_and_parses_places() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/nearby")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("latitude".into(), "10".into()),
                Matcher::UrlEncoded("longitude".into(), "20".into()),
                Matcher::UrlEncoded("radius".into(), "5".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"lat": 10, "lng": 20, "name": "Cafe"}]"#)
            .create_async()
            .await;

        let service = PlaceService::new(format!("{}/nearby", server.url()));
        let places = service.nearby(&query()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            places,
            vec![Place {
                lat: 10.0,
                lng: 20.0,
                name: "Cafe".into()
            }]
        );
    }

    #[tokio::test]
    async fn error_message_is_read_from_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/nearby")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"message": "index unavailable"}"#)
            .create_async()
            .await;

        let service = PlaceService::new(format!("{}/nearby", server.url()));
        let err = service.nearby(&query()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("500"), "{message}");
        assert!(message.ends_with("index unavailable"), "{message}");
    }

    #[tokio::test]
    async fn error_without_message_uses_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/nearby")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let service = PlaceService::new(format!("{}/nearby", server.url()));
        let err = service.nearby(&query()).await.unwrap_err();
        assert_eq!(err.to_string(), "remote service responded 503 Service Unavailable");
    }

    #[tokio::test]
    async fn unexpected_payload_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/nearby")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"places": []}"#)
            .create_async()
            .await;

        let service = PlaceService::new(format!("{}/nearby", server.url()));
        assert!(service.nearby(&query()).await.is_err());
    }
}
