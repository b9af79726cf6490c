use reqwest::redirect::Policy;
use reqwest::Url;

use crate::shared::constants::MAX_REDIRECTS;

/// Redirect policy that refuses to leave HTTPS for plain HTTP.
///
/// A downgrading redirect is not followed; the redirect response itself is
/// returned to the caller, which then sees a non-success status.
pub fn no_downgrade() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        let downgrade = attempt
            .previous()
            .last()
            .is_some_and(|from| is_downgrade(from, attempt.url()));
        if downgrade {
            log::warn!("Refusing insecure redirect to {}", attempt.url());
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

pub fn is_downgrade(from: &Url, to: &Url) -> bool {
    from.scheme() == "https" && to.scheme() == "http"
}
