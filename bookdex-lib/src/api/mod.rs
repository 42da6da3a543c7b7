use serde::de::DeserializeOwned;

pub(crate) mod abebooks_covers;
pub(crate) mod google_books;
pub(crate) mod internet_archive;
pub(crate) mod open_alex;
pub(crate) mod open_library;
pub(crate) mod open_library_covers;

/// A minimal blocking HTTP capability the provider adapters are generic over.
///
/// The orchestrator owns one client per lookup so that the underlying
/// session (and its configured timeout) is reused across provider calls.
pub trait Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;

    /// Issues a GET and returns only the response status code.
    ///
    /// Used by the cover providers, which probe for an image rather than
    /// fetch a body.
    fn get_status(&self, url: &str) -> Result<u16, Error>;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::Network, e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::new(ErrorKind::NotFound, "404 Not Found"));
        }
        if !status.is_success() {
            return Err(Error::new(
                ErrorKind::Network,
                format!("unexpected status {status}"),
            ));
        }

        resp.json().map_err(|e| Error::wrap(ErrorKind::Parse, e))
    }

    fn get_status(&self, url: &str) -> Result<u16, Error> {
        self.get(url)
            .send()
            .map(|r| r.status().as_u16())
            .map_err(|e| Error::wrap(ErrorKind::Network, e))
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_status_producer, impl_text_producer, requested_urls, MockClient,
    NetworkErrorProducer, NotFoundStatusProducer, Producer,
};

use crate::{Error, ErrorKind};

#[cfg(test)]
mod test {

    use super::*;

    thread_local! {
        pub(crate) static URL_LOG: std::cell::RefCell<Vec<String>> =
            std::cell::RefCell::new(Vec::new());
    }

    /// Returns every URL the [`MockClient`] has been asked for so far, in
    /// request order.
    ///
    /// Each test runs on its own thread so the log is private to the test.
    pub(crate) fn requested_urls() -> Vec<String> {
        URL_LOG.with(|log| log.borrow().clone())
    }

    pub(crate) fn log_url(url: &str) {
        URL_LOG.with(|log| log.borrow_mut().push(url.to_owned()));
    }

    /// Asserts that the expected URL is the last one requested through the
    /// [`MockClient`].
    ///
    /// The [`MockClient`] appends every URL passed to it to the thread local
    /// `URL_LOG`, which allows asserting that adapters build the correct
    /// request URL.
    macro_rules! assert_url {
        ($expected: expr) => {
            assert_url!($expected, "");
        };
        ($expected: expr, $($arg: tt)+) => {
            let url = crate::api::requested_urls().pop().unwrap_or_default();
            assert_eq!($expected, url, $($arg)+);
        };
    }

    pub(crate) trait Producer<T>
    where
        Self: Default,
    {
        fn produce() -> Result<T, Error>;
    }

    #[derive(Default)]
    pub(crate) struct MockClient<P: Producer<String> = EmptyTextProducer, S: Producer<u16> = OkStatusProducer>
    {
        _producer: std::marker::PhantomData<(P, S)>,
    }

    impl<P: Producer<String>, S: Producer<u16>> Client for MockClient<P, S> {
        fn get_json<T>(&self, url: &str) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            log_url(url);
            P::produce().and_then(|json| {
                serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Parse, e))
            })
        }

        fn get_status(&self, url: &str) -> Result<u16, Error> {
            log_url(url);
            S::produce()
        }
    }

    macro_rules! impl_text_producer {
        ($($producer:ident => $exp:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::Producer<String> for $producer {
                    fn produce() -> Result<String, crate::Error> {
                        $exp
                    }
                }
            )*
        };
    }

    macro_rules! impl_status_producer {
        ($($producer:ident => $exp:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::Producer<u16> for $producer {
                    fn produce() -> Result<u16, crate::Error> {
                        $exp
                    }
                }
            )*
        };
    }

    impl_text_producer! {
        EmptyTextProducer => Ok("".to_owned()),
        NetworkErrorProducer => Err(Error::new(ErrorKind::Network, "Network error")),
    }

    impl_status_producer! {
        OkStatusProducer => Ok(200),
        NotFoundStatusProducer => Ok(404),
    }

    pub(crate) use assert_url;
    pub(crate) use impl_status_producer;
    pub(crate) use impl_text_producer;
}
