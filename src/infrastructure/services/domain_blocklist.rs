// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::domain::models::crawl::MULTI_URL_DELIMITER;
use crate::domain::services::blocklist_service::UrlBlocklist;
use crate::engines::validators::host_matches_domain;

/// 域名黑名单
///
/// 按主机名匹配（含子域名）；逗号分隔的多个URL逐个检查
pub struct DomainBlocklist {
    domains: Vec<String>,
}

impl DomainBlocklist {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().trim_start_matches("www.").to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    fn is_part_blocked(&self, part: &str) -> bool {
        match Url::parse(part).ok().and_then(|u| u.host_str().map(str::to_string)) {
            Some(host) => self.domains.iter().any(|d| host_matches_domain(&host, d)),
            // Not a parseable absolute URL, fall back to a substring check.
            None => {
                let lowered = part.to_ascii_lowercase();
                self.domains.iter().any(|d| lowered.contains(d.as_str()))
            }
        }
    }
}

impl UrlBlocklist for DomainBlocklist {
    fn is_blocked(&self, url: &str) -> bool {
        url.split(MULTI_URL_DELIMITER)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .any(|part| self.is_part_blocked(part))
    }
}
