//! Per-course checklist scraping.
//!
//! The path through a course is fixed: the last week section on the
//! course page links to the current learning guide (a "book" resource),
//! whose table of contents links to a "Checklist" chapter. Each non-blank
//! paragraph in that chapter's main region is one assignment item.

use crate::error::HarvestError;
use crate::portal::client::{resolve_href, PortalClient};
use crate::portal::courses::Course;
use scraper::{Html, Selector};
use tracing::debug;

/// Anchor text of the checklist chapter in the book's table of contents.
const CHECKLIST_LABEL: &str = "Checklist";

/// From a course page, find the learning-guide link in the last week section.
pub fn find_book_link(html: &str, base_url: &str) -> Result<String, HarvestError> {
    let document = Html::parse_document(html);
    let section_sel = Selector::parse(".weeks .section").unwrap();
    let book_sel = Selector::parse("li.modtype_book a").unwrap();

    let last_section = document
        .select(&section_sel)
        .last()
        .ok_or_else(|| HarvestError::Navigation(format!("no week section on {base_url}")))?;

    last_section
        .select(&book_sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| resolve_href(base_url, href))
        .ok_or_else(|| {
            HarvestError::Navigation(format!("no book link in last week section on {base_url}"))
        })
}

/// From a book page, find the "Checklist" link in the table of contents.
pub fn find_checklist_link(html: &str, base_url: &str) -> Result<String, HarvestError> {
    let document = Html::parse_document(html);
    let toc_sel = Selector::parse(".block_book_toc a").unwrap();

    document
        .select(&toc_sel)
        .find(|el| el.text().collect::<Vec<_>>().join(" ").trim() == CHECKLIST_LABEL)
        .and_then(|el| el.value().attr("href"))
        .map(|href| resolve_href(base_url, href))
        .ok_or_else(|| {
            HarvestError::Navigation(format!("no {CHECKLIST_LABEL:?} link on {base_url}"))
        })
}

/// Collect every non-blank paragraph from the checklist page's main
/// content region, page order preserved.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let sel = Selector::parse("#region-main p").unwrap();

    document
        .select(&sel)
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Scrape one course's checklist into prefixed assignment items.
pub async fn scrape_course(
    client: &PortalClient,
    course: &Course,
    code: &str,
) -> Result<Vec<String>, HarvestError> {
    debug!("loading course page {}", course.url);
    let course_page = client.get(&course.url).await?;

    let book_url = find_book_link(&course_page.body, &course_page.url)?;
    debug!("found latest learning guide link");

    let book_page = client.get(&book_url).await?;
    debug!("learning guide page loaded");

    let checklist_url = find_checklist_link(&book_page.body, &book_page.url)?;
    debug!("found checklist link");

    let checklist_page = client.get(&checklist_url).await?;
    debug!("checklist page loaded");

    let items: Vec<String> = extract_paragraphs(&checklist_page.body)
        .into_iter()
        .map(|text| format!("{code}: {text}"))
        .collect();

    debug!("found {} assignments for {code}", items.len());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE_PAGE: &str = r#"
        <ul class="weeks">
          <li class="section"><h3>Week 1</h3>
            <ul><li class="activity modtype_book">
              <a href="/mod/book/view.php?id=1">Guide 1</a></li></ul>
          </li>
          <li class="section"><h3>Week 5</h3>
            <ul><li class="activity modtype_forum">
              <a href="/mod/forum/view.php?id=8">Forum</a></li>
            <li class="activity modtype_book">
              <a href="/mod/book/view.php?id=9">Guide 5</a></li></ul>
          </li>
        </ul>"#;

    #[test]
    fn book_link_comes_from_the_last_week_section() {
        let url = find_book_link(COURSE_PAGE, "https://portal.example/course/view.php?id=4")
            .unwrap();
        assert_eq!(url, "https://portal.example/mod/book/view.php?id=9");
    }

    #[test]
    fn missing_week_section_is_a_navigation_error() {
        let err = find_book_link("<html></html>", "https://portal.example/c").unwrap_err();
        assert!(matches!(err, HarvestError::Navigation(_)));
    }

    #[test]
    fn week_section_without_book_is_a_navigation_error() {
        let html = r#"<div class="weeks"><div class="section">
            <ul><li class="modtype_forum"><a href="/f">Forum</a></li></ul></div></div>"#;
        let err = find_book_link(html, "https://portal.example/c").unwrap_err();
        assert!(matches!(err, HarvestError::Navigation(_)));
    }

    #[test]
    fn checklist_link_matched_by_text() {
        let html = r#"<div class="block_book_toc">
            <a href="view.php?id=9&chapterid=1">Overview</a>
            <a href="view.php?id=9&chapterid=3">Checklist</a></div>"#;
        let url =
            find_checklist_link(html, "https://portal.example/mod/book/view.php?id=9").unwrap();
        assert_eq!(
            url,
            "https://portal.example/mod/book/view.php?id=9&chapterid=3"
        );
    }

    #[test]
    fn missing_checklist_link_is_a_navigation_error() {
        let html = r#"<div class="block_book_toc"><a href="x">Overview</a></div>"#;
        let err = find_checklist_link(html, "https://portal.example/b").unwrap_err();
        assert!(matches!(err, HarvestError::Navigation(_)));
    }

    #[test]
    fn blank_paragraphs_are_dropped() {
        let html = r#"<div id="region-main">
            <p>Read Ch.1</p>
            <p>   </p>
            <p></p>
            <p>Submit Quiz</p>
          </div>
          <p>outside main region</p>"#;
        assert_eq!(extract_paragraphs(html), vec!["Read Ch.1", "Submit Quiz"]);
    }

    #[test]
    fn empty_checklist_yields_no_items() {
        assert!(extract_paragraphs(r#"<div id="region-main"></div>"#).is_empty());
    }
}
