//! Course enumeration and short-code derivation.

use crate::error::HarvestError;
use crate::portal::client::resolve_href;
use scraper::{Html, Selector};
use tracing::debug;

/// One enrolled course, as listed on the "My courses" page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    pub url: String,
}

/// Find the href of the first anchor whose text equals `label`.
pub fn find_link_by_text(html: &str, base_url: &str, label: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let sel = Selector::parse("a").unwrap();
    document
        .select(&sel)
        .find(|el| {
            el.text().collect::<Vec<_>>().join(" ").trim() == label
        })
        .and_then(|el| el.value().attr("href"))
        .map(|href| resolve_href(base_url, href))
}

/// Extract courses from the "My courses" page, page order preserved.
///
/// Entries whose title contains any exclusion substring (case-insensitive)
/// are administrative pseudo-courses, not coursework, and are dropped.
pub fn parse_courses(html: &str, base_url: &str, exclusions: &[String]) -> Vec<Course> {
    let document = Html::parse_document(html);
    let sel = Selector::parse(".coursebox h2 a").unwrap();

    let mut courses = Vec::new();
    for anchor in document.select(&sel) {
        let text = anchor.text().collect::<Vec<_>>().join(" ").trim().to_string();
        debug!("found course: {text}");

        let lowered = text.to_lowercase();
        if exclusions.iter().any(|ex| lowered.contains(&ex.to_lowercase())) {
            debug!("skipping {text} (not a real course)");
            continue;
        }

        let name = anchor
            .value()
            .attr("title")
            .map(|t| t.to_string())
            .unwrap_or_else(|| text.clone());
        let url = anchor
            .value()
            .attr("href")
            .map(|h| resolve_href(base_url, h))
            .unwrap_or_default();

        debug!("adding {name} to the course list");
        courses.push(Course { name, url });
    }
    courses
}

/// Derive the short code used as a label prefix for a course's items.
///
/// Titles look like `"CS 1102 Programming 1 - T3 2015-2016"` or
/// `"CS1102 Programming 1 - T3 2015-2016"`: if the second word is numeric
/// the code is the first two words glued together, otherwise just the
/// first word. A title of fewer than two words has no derivable code and
/// is rejected rather than indexed blindly.
pub fn short_code(title: &str) -> Result<String, HarvestError> {
    let parts: Vec<&str> = title.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(HarvestError::MalformedTitle {
            title: title.to_string(),
        });
    }
    if parts[1].parse::<u32>().is_ok() {
        Ok(format!("{}{}", parts[0], parts[1]))
    } else {
        Ok(parts[0].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_exclusions() -> Vec<String> {
        vec![
            "peer assessment".to_string(),
            "student writing center".to_string(),
        ]
    }

    const MY_COURSES: &str = r#"
        <div class="coursebox"><h2>
          <a title="CS 1102 Programming 1 - T3 2015-2016"
             href="/course/view.php?id=4">CS 1102 Programming 1</a></h2></div>
        <div class="coursebox"><h2>
          <a title="Peer Assessment" href="/course/view.php?id=5">Peer Assessment</a></h2></div>
        <div class="coursebox"><h2>
          <a title="STUDENT WRITING CENTER" href="/course/view.php?id=6">STUDENT WRITING CENTER</a></h2></div>
        <div class="coursebox"><h2>
          <a title="MATH 1201 College Algebra" href="/course/view.php?id=7">MATH 1201 College Algebra</a></h2></div>"#;

    #[test]
    fn enumerates_courses_in_page_order_with_exclusions() {
        let courses = parse_courses(
            MY_COURSES,
            "https://portal.example/my/",
            &default_exclusions(),
        );
        assert_eq!(
            courses,
            vec![
                Course {
                    name: "CS 1102 Programming 1 - T3 2015-2016".into(),
                    url: "https://portal.example/course/view.php?id=4".into(),
                },
                Course {
                    name: "MATH 1201 College Algebra".into(),
                    url: "https://portal.example/course/view.php?id=7".into(),
                },
            ]
        );
    }

    #[test]
    fn exclusion_matching_is_case_insensitive() {
        let html = r#"<div class="coursebox"><h2>
            <a href="/c">PEER ASSESSMENT workshop</a></h2></div>"#;
        assert!(parse_courses(html, "https://portal.example/", &default_exclusions()).is_empty());
    }

    #[test]
    fn no_courses_is_an_empty_sequence_not_an_error() {
        assert!(parse_courses("<html></html>", "https://portal.example/", &[]).is_empty());
    }

    #[test]
    fn falls_back_to_link_text_without_title_attr() {
        let html = r#"<div class="coursebox"><h2>
            <a href="/course/view.php?id=8">HIST 1421 Greek Civilization</a></h2></div>"#;
        let courses = parse_courses(html, "https://portal.example/", &[]);
        assert_eq!(courses[0].name, "HIST 1421 Greek Civilization");
    }

    #[test]
    fn finds_my_courses_link() {
        let html = r#"<a href="/my/">Dashboard</a> <a href="/my/courses.php"> My courses </a>"#;
        assert_eq!(
            find_link_by_text(html, "https://portal.example/index.php", "My courses"),
            Some("https://portal.example/my/courses.php".to_string())
        );
        assert_eq!(
            find_link_by_text(html, "https://portal.example/", "No such link"),
            None
        );
    }

    #[test]
    fn short_code_glues_dept_and_number() {
        assert_eq!(
            short_code("CS 1102 Programming 1 - T3 2015-2016").unwrap(),
            "CS1102"
        );
        assert_eq!(short_code("MATH 1201 College Algebra").unwrap(), "MATH1201");
    }

    #[test]
    fn short_code_keeps_first_word_when_second_is_not_numeric() {
        assert_eq!(short_code("Library Orientation").unwrap(), "Library");
        assert_eq!(
            short_code("CS1102 Programming 1 - T3 2015-2016").unwrap(),
            "CS1102"
        );
    }

    #[test]
    fn one_word_title_is_malformed() {
        let err = short_code("Orientation").unwrap_err();
        assert!(matches!(err, HarvestError::MalformedTitle { .. }));
        assert!(short_code("  ").is_err());
    }
}
