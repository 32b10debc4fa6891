//! Race result resolution and certificate mapping for iRacing results.
//!
//! Podium Prints turns iRacing members API result payloads into the flat
//! records a certificate renderer needs.
//!
//! # Features
//!
//! - **Result resolution**: find a driver in a race classification, either as
//!   an individual entry or as a member of a team crew
//! - **Certificate mapping**: event naming, splits, positions and logos for
//!   one race result
//! - **Season certificates**: season participation and standings lookups
//!   against the members API
//! - **Job polling**: bounded, cancellable polling of asynchronous jobs
//!
//! # Example
//!
//! ```rust,no_run
//! use podiumprints::{SessionResult, SpecialEventLogos, build_certificate};
//!
//! fn main() -> podiumprints::Result<()> {
//!     let json = std::fs::read_to_string("results.json").expect("results payload");
//!     let session = SessionResult::parse(&json)?;
//!     let record = build_certificate(&session, 123456, &SpecialEventLogos)?;
//!     println!("{} finished P{} in split {}", record.event, record.position, record.split);
//!     Ok(())
//! }
//! ```
//!
//! Fetching results from the members API goes through [`Handlers`]:
//!
//! ```rust,no_run
//! use podiumprints::api::{CookieCache, MembersClient};
//! use podiumprints::{Config, Handlers, RaceResultsRequest};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> podiumprints::Result<()> {
//!     let config = Config::from_env()?;
//!     let cookies = CookieCache::new();
//!     cookies.store("authtoken_members=...", config.cookie_ttl());
//!
//!     let handlers = Handlers::new(MembersClient::new(&config, cookies)?, config);
//!     let record = handlers.race_certificate(RaceResultsRequest::new(61540155, 123456)).await?;
//!     println!("{record:?}");
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;

// Payloads and pure transformations
pub mod certificate;
pub mod format;
pub mod logo;
pub mod resolver;
pub mod schema;
pub mod season;

// Members API and request surface
pub mod api;
pub mod config;
pub mod handlers;
pub mod job;
pub mod logging;

// Core exports
pub use error::*;

pub use certificate::{CertificateRecord, build_certificate, map};
pub use config::Config;
pub use handlers::{Handlers, RaceResultsRequest, SeasonParticipationRequest, SeasonResultsRequest};
pub use job::{JobState, PollPolicy, poll_until_ready};
pub use logo::{LogoLookup, NoSpecialLogos, SpecialEventLogos};
pub use resolver::{EntryMatch, ResolvedEntry, division_of, resolve};
pub use schema::SessionResult;
pub use season::{SeasonParticipation, SeasonRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outward_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CertificateRecord>();
        assert_send_sync::<CertificateError>();
        assert_send_sync::<SessionResult>();
        assert_send_sync::<SeasonRecord>();
        assert_send_sync::<Config>();
        assert_send_sync::<Handlers<test_utils::FakeApi>>();
        assert_send_sync::<ResolvedEntry<'static>>();
    }
}
