use std::{collections::HashMap, time::Duration};

use futures::{future::err, Future};
use http::header::CONTENT_TYPE;
use hyper::{
    client::{Client, HttpConnector},
    Body, Request,
};
use hyper_tls::HttpsConnector;
use tokio_timer::Timer;
use url::form_urlencoded;

use crate::error::Error;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub struct Notifier {
    client: Client<HttpsConnector<HttpConnector>>,
    timer: Timer,
    timeout: Duration,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Result<Notifier, Error> {
        let mut client = Client::builder();
        client.keep_alive(false);

        let connector = HttpsConnector::new(1)
            .map_err(|e| Error::Network(format!("could not initialize TLS: {}", e)))?;

        Ok(Notifier {
            client: client.build(connector),
            timer: Timer::default(),
            timeout,
        })
    }

    /// Sends the payload to `url` as one form-encoded POST, blocking until
    /// the response arrives or the timeout fires. The status code is logged
    /// but not acted upon; only transport failures are errors.
    pub fn notify(&self, url: &str, payload: &HashMap<String, String>) -> Result<(), Error> {
        let request = self.build_request(url, payload)?;

        let error_url = url.to_string();
        let connection_error =
            move |e: hyper::Error| Error::Network(format!("POST {} failed: {}", error_url, e));

        let timeout = self.timer.sleep(self.timeout).then(|_| err(Error::Timeout));

        let post = self
            .client
            .request(request)
            .map_err(connection_error)
            .select(timeout)
            .map(|(response, _)| response)
            .map_err(|(error, _)| error);

        let mut runtime = tokio::runtime::Runtime::new()?;
        let response = runtime.block_on(post)?;

        info!(
            "Notification forwarded";
            "url" => url,
            "status_code" => response.status().as_u16(),
            "fields" => payload.len()
        );

        Ok(())
    }

    fn build_request(
        &self,
        url: &str,
        payload: &HashMap<String, String>,
    ) -> Result<Request<Body>, Error> {
        let mut builder = Request::builder();
        builder.method("POST");
        builder.uri(url);
        builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE);

        builder
            .body(Body::from(encode_form(payload)))
            .map_err(|e| Error::Network(format!("cannot request {}: {}", url, e)))
    }
}

/// Percent-encodes the payload as a form body, pairs sorted by key so the
/// same payload always produces the same body.
fn encode_form(payload: &HashMap<String, String>) -> String {
    let mut pairs: Vec<_> = payload.iter().collect();
    pairs.sort();

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
