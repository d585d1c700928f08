//! Listing page addressing and per-page state.

use crate::link::Link;

use reqwest::Url;
use std::collections::HashSet;
use tracing::warn;

/// Reads the page number from `url`'s `param` query parameter.
///
/// Missing, unparsable or zero values yield page 1.
pub fn initial_page(url: &Url, param: &str) -> u32 {
    let Some((_, value)) = url.query_pairs().find(|(k, _)| k == param) else {
        return 1;
    };
    match value.trim().parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => {
            warn!("Ignoring page number {:?} in {}, starting at 1", value, url);
            1
        }
    }
}

/// Returns `url` with its `param` query parameter set to `page`.
///
/// An existing parameter is replaced in place; otherwise it is appended.
/// Other query pairs keep their order.
pub fn page_url(url: &Url, param: &str, page: u32) -> Url {
    let page = page.to_string();
    let mut found = false;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(k, v)| {
            if k != param {
                return Some((k.into_owned(), v.into_owned()));
            }
            if found {
                // Drop repeated occurrences.
                return None;
            }
            found = true;
            Some((k.into_owned(), page.clone()))
        })
        .collect();

    let mut next = url.clone();
    {
        let mut query = next.query_pairs_mut();
        query.clear();
        for (k, v) in &pairs {
            query.append_pair(k, v);
        }
        if !found {
            query.append_pair(param, &page);
        }
    }
    next
}

/// Links found on one listing page.
#[derive(Debug, Clone)]
pub struct PageState {
    pub page_number: u32,
    pub links: Vec<Link>,
    pub filenames: HashSet<String>,
}

impl PageState {
    pub fn new(page_number: u32, links: Vec<Link>) -> Self {
        let filenames = links.iter().map(|l| l.filename.clone()).collect();
        Self {
            page_number,
            links,
            filenames,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// `true` when the page is non-empty and every one of its filenames was
    /// already listed on `previous`, i.e. the listing has started repeating.
    pub fn repeats(&self, previous: &HashSet<String>) -> bool {
        !self.is_empty() && self.filenames.iter().all(|f| previous.contains(f))
    }
}
