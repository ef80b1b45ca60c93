//! Google Scholar profile scraping.
//!
//! A profile lists publications in pages of table rows; each row links to a
//! citation page carrying the full author list, date and venue fields.

use std::time::Duration;

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

use sitepubs::{AuthorsField, RawPublication};

const BASE_URL: &str = "https://scholar.google.com/citations";
const PAGE_SIZE: usize = 100;
/// Scholar caps profiles well below this
const MAX_PAGES: usize = 20;
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) sitepubs/0.1";

/// One row of a profile's publication table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEntry {
    pub title: String,
    /// Relative link to the citation page
    pub citation_path: Option<String>,
    /// Possibly truncated with "..."
    pub authors: String,
    pub venue: String,
    pub year: Option<String>,
}

pub struct ScholarClient {
    http: reqwest::Client,
    base: Url,
    delay: Duration,
}

impl ScholarClient {
    pub fn new(delay: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        let base = Url::parse(BASE_URL)?;
        Ok(Self { http, base, delay })
    }

    /// Fetch every publication row of a profile, one page at a time.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Vec<ProfileEntry>> {
        let mut entries = Vec::new();

        for page in 0..MAX_PAGES {
            let cstart = page * PAGE_SIZE;
            let mut url = self.base.clone();
            url.query_pairs_mut()
                .append_pair("user", user_id)
                .append_pair("hl", "en")
                .append_pair("cstart", &cstart.to_string())
                .append_pair("pagesize", &PAGE_SIZE.to_string());

            let html = self.get_html(&url).await?;
            let rows = parse_profile_page(&html);
            info!("Profile page {}: {} publications", page + 1, rows.len());

            let done = rows.len() < PAGE_SIZE;
            entries.extend(rows);
            if done {
                break;
            }
            tokio::time::sleep(self.delay).await;
        }

        Ok(entries)
    }

    /// Fetch the citation page behind a profile row and merge both sources.
    pub async fn fetch_publication(&self, entry: &ProfileEntry) -> Result<RawPublication> {
        let path = entry
            .citation_path
            .as_deref()
            .context("Profile entry has no citation link")?;
        let url = self
            .base
            .join(path)
            .with_context(|| format!("Bad citation link: {path}"))?;

        let html = self.get_html(&url).await?;
        Ok(parse_citation_page(&html, entry))
    }

    async fn get_html(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .context("Failed to fetch URL")?
            .error_for_status()
            .context("Scholar refused the request (rate limited?)")?;

        response.text().await.context("Failed to read response body")
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the publication rows of a profile page.
pub fn parse_profile_page(html: &str) -> Vec<ProfileEntry> {
    let document = Html::parse_document(html);
    let row_sel = selector("tr.gsc_a_tr");
    let title_sel = selector("a.gsc_a_at");
    let gray_sel = selector("div.gs_gray");
    let year_sel = selector("span.gsc_a_h");

    document
        .select(&row_sel)
        .filter_map(|row| {
            let link = row.select(&title_sel).next()?;
            let title = element_text(link);
            if title.is_empty() {
                return None;
            }

            let mut gray = row.select(&gray_sel).map(element_text);
            let authors = gray.next().unwrap_or_default();
            let venue = gray.next().unwrap_or_default();
            let year = row
                .select(&year_sel)
                .next()
                .map(element_text)
                .filter(|y| !y.is_empty());

            Some(ProfileEntry {
                title,
                citation_path: link.value().attr("href").map(String::from),
                authors,
                venue,
                year,
            })
        })
        .collect()
}

/// Parse a citation page, falling back to the profile row for missing fields.
pub fn parse_citation_page(html: &str, entry: &ProfileEntry) -> RawPublication {
    let document = Html::parse_document(html);
    let title_sel = selector("#gsc_oci_title");
    let title_link_sel = selector("a.gsc_oci_title_link");
    let eprint_sel = selector("#gsc_oci_title_gg a");
    let row_sel = selector("#gsc_oci_table div.gs_scl");
    let field_sel = selector("div.gsc_oci_field");
    let value_sel = selector("div.gsc_oci_value");

    let mut raw = RawPublication {
        title: document
            .select(&title_sel)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .or_else(|| Some(entry.title.clone())),
        pub_url: document
            .select(&title_link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(String::from),
        eprint_url: document
            .select(&eprint_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(String::from),
        ..Default::default()
    };

    for row in document.select(&row_sel) {
        let (Some(field), Some(value)) = (row.select(&field_sel).next(), row.select(&value_sel).next())
        else {
            continue;
        };
        let value = Some(element_text(value)).filter(|v| !v.is_empty());

        match element_text(field).to_lowercase().as_str() {
            "authors" | "inventors" => raw.authors = value.map(AuthorsField::Text),
            "publication date" => raw.pub_date = value,
            "journal" => raw.journal = value,
            "conference" | "book" => raw.conference = value,
            "publisher" => raw.publisher = value,
            "source" => raw.venue = value,
            "doi" => raw.doi = value,
            _ => {}
        }
    }

    if raw.authors.is_none() && !entry.authors.is_empty() {
        raw.authors = Some(AuthorsField::Text(entry.authors.clone()));
    }
    if raw.pub_date.is_none() {
        raw.pub_date = entry.year.clone();
    }
    let has_venue = [&raw.venue, &raw.journal, &raw.conference, &raw.publisher]
        .iter()
        .any(|v| v.is_some());
    if !has_venue && !entry.venue.is_empty() {
        raw.venue = Some(entry.venue.clone());
    }

    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_HTML: &str = r#"
<html><body><table id="gsc_a_t"><tbody id="gsc_a_b">
<tr class="gsc_a_tr">
  <td class="gsc_a_t">
    <a href="/citations?view_op=view_citation&amp;hl=en&amp;user=ABC&amp;citation_for_view=ABC:x1" class="gsc_a_at">Wearable   sensors for health</a>
    <div class="gs_gray">C Tang, S Wang</div>
    <div class="gs_gray">Nature Communications 14 (1), 2023</div>
  </td>
  <td class="gsc_a_c"><a class="gsc_a_ac">12</a></td>
  <td class="gsc_a_y"><span class="gsc_a_h gsc_a_hc">2023</span></td>
</tr>
<tr class="gsc_a_tr">
  <td class="gsc_a_t">
    <a href="/citations?view_op=view_citation&amp;citation_for_view=ABC:x2" class="gsc_a_at">Undated note</a>
    <div class="gs_gray">S Wang</div>
    <div class="gs_gray"></div>
  </td>
  <td class="gsc_a_y"><span class="gsc_a_h"></span></td>
</tr>
<tr class="gsc_a_tr"><td class="gsc_a_e">There are no articles in this profile.</td></tr>
</tbody></table></body></html>
"#;

    const CITATION_HTML: &str = r#"
<html><body>
<div id="gsc_oci_title_gg"><div class="gsc_oci_title_ggi"><a href="https://arxiv.org/pdf/2301.00001"><span>[PDF]</span> arxiv.org</a></div></div>
<div id="gsc_oci_title"><a class="gsc_oci_title_link" href="https://www.nature.com/articles/s41467-023-1">Wearable sensors for health</a></div>
<div id="gsc_oci_table">
  <div class="gs_scl"><div class="gsc_oci_field">Authors</div><div class="gsc_oci_value">Chenyu Tang, Shengbo Wang</div></div>
  <div class="gs_scl"><div class="gsc_oci_field">Publication date</div><div class="gsc_oci_value">2023/5/12</div></div>
  <div class="gs_scl"><div class="gsc_oci_field">Journal</div><div class="gsc_oci_value">Nature Communications</div></div>
  <div class="gs_scl"><div class="gsc_oci_field">Volume</div><div class="gsc_oci_value">14</div></div>
</div>
</body></html>
"#;

    #[test]
    fn test_parse_profile_page() {
        let entries = parse_profile_page(PROFILE_HTML);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].title, "Wearable sensors for health");
        assert_eq!(entries[0].authors, "C Tang, S Wang");
        assert_eq!(entries[0].venue, "Nature Communications 14 (1), 2023");
        assert_eq!(entries[0].year.as_deref(), Some("2023"));
        assert_eq!(
            entries[0].citation_path.as_deref(),
            Some("/citations?view_op=view_citation&hl=en&user=ABC&citation_for_view=ABC:x1")
        );

        assert_eq!(entries[1].title, "Undated note");
        assert_eq!(entries[1].venue, "");
        assert_eq!(entries[1].year, None);
    }

    #[test]
    fn test_parse_citation_page() {
        let entry = &parse_profile_page(PROFILE_HTML)[0];
        let raw = parse_citation_page(CITATION_HTML, entry);

        assert_eq!(raw.title.as_deref(), Some("Wearable sensors for health"));
        assert_eq!(raw.authors, Some(AuthorsField::from("Chenyu Tang, Shengbo Wang")));
        assert_eq!(raw.pub_date.as_deref(), Some("2023/5/12"));
        assert_eq!(raw.journal.as_deref(), Some("Nature Communications"));
        assert_eq!(raw.venue, None);
        assert_eq!(raw.eprint_url.as_deref(), Some("https://arxiv.org/pdf/2301.00001"));
        assert_eq!(
            raw.pub_url.as_deref(),
            Some("https://www.nature.com/articles/s41467-023-1")
        );
    }

    #[test]
    fn test_citation_page_falls_back_to_profile_row() {
        let entry = ProfileEntry {
            title: "Short paper".into(),
            authors: "A Smith, S Wang".into(),
            venue: "Some Workshop 2021".into(),
            year: Some("2021".into()),
            ..Default::default()
        };
        let raw = parse_citation_page("<html><body></body></html>", &entry);

        assert_eq!(raw.title.as_deref(), Some("Short paper"));
        assert_eq!(raw.authors, Some(AuthorsField::from("A Smith, S Wang")));
        assert_eq!(raw.pub_date.as_deref(), Some("2021"));
        assert_eq!(raw.venue.as_deref(), Some("Some Workshop 2021"));
        assert_eq!(raw.eprint_url, None);
    }

    #[test]
    fn test_citation_url_joins_base() {
        let client = ScholarClient::new(Duration::from_millis(0)).unwrap();
        let url = client
            .base
            .join("/citations?view_op=view_citation&citation_for_view=ABC:x1")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://scholar.google.com/citations?view_op=view_citation&citation_for_view=ABC:x1"
        );
    }
}
