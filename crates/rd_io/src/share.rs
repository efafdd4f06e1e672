//! Share URLs: `base?year=<y>&share=<payload>`.
//!
//! `year` is omitted when it equals the default dataset year. An empty `share`
//! parameter counts as absent.

use url::Url;

use crate::IoError;

/// Parameters recovered from a share URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareQuery {
    pub year: Option<String>,
    pub share: Option<String>,
}

/// Build a share URL. Any query or fragment already on `base` is replaced.
pub fn share_url(base: &str, year: &str, default_year: &str, payload: &str) -> Result<String, IoError> {
    let mut url = Url::parse(base)?;
    url.set_fragment(None);
    url.set_query(None);
    {
        let mut q = url.query_pairs_mut();
        if year != default_year {
            q.append_pair("year", year);
        }
        q.append_pair("share", payload);
    }
    Ok(url.into())
}

/// Extract `year` and `share` from a full URL or a bare `?query`.
pub fn parse_share_query(input: &str) -> Result<ShareQuery, IoError> {
    let url = match Url::parse(input) {
        Ok(u) => u,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://localhost/")?;
            base.join(input)?
        }
        Err(e) => return Err(e.into()),
    };

    let mut out = ShareQuery::default();
    for (k, v) in url.query_pairs() {
        match k.as_ref() {
            "year" if !v.is_empty() => out.year = Some(v.into_owned()),
            "share" if !v.is_empty() => out.share = Some(v.into_owned()),
            _ => {}
        }
    }
    Ok(out)
}
