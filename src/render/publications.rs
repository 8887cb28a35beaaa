//! Publications page, grouped by year and venue.

use maud::{html, Markup};

use super::{empty_notice, image_fallback, image_path, page_shell};
use crate::data::model::{Publication, Venue};

/// Publications of one year, split by venue.
#[derive(Debug)]
pub struct YearGroup<'a> {
    /// `None` collects entries without a usable year.
    pub year: Option<i32>,
    /// Non-empty venue sections: journals, then conferences, then the rest.
    pub venues: Vec<(Venue, Vec<&'a Publication>)>,
}

impl YearGroup<'_> {
    pub fn label(&self) -> String {
        self.year
            .map_or_else(|| "Unknown".to_string(), |y| y.to_string())
    }
}

/// Groups publications by year, newest first, with undated entries last.
pub fn group_publications(publications: &[Publication]) -> Vec<YearGroup<'_>> {
    let mut years: Vec<Option<i32>> = Vec::new();
    for publication in publications {
        if !years.contains(&publication.year) {
            years.push(publication.year);
        }
    }
    years.sort_by(|a, b| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    years
        .into_iter()
        .map(|year| {
            let venues = [Venue::Journal, Venue::Conference, Venue::Other]
                .into_iter()
                .map(|venue| {
                    let entries: Vec<&Publication> = publications
                        .iter()
                        .filter(|p| p.year == year && p.venue() == venue)
                        .collect();
                    (venue, entries)
                })
                .filter(|(_, entries)| !entries.is_empty())
                .collect();
            YearGroup { year, venues }
        })
        .collect()
}

pub fn render_publications(publications: &[Publication], data_path: &str) -> Markup {
    if publications.is_empty() {
        return empty_notice("Publications", "publications found", data_path);
    }

    let groups = group_publications(publications);
    page_shell(
        "Publications",
        html! {
            @for group in &groups {
                div class="mb-12 last:mb-0" {
                    div class="flex items-center mb-6" {
                        h3 class="text-3xl font-extrabold text-gray-900 mr-4" { (group.label()) }
                        div class="flex-grow h-1 bg-gray-200 rounded" {}
                    }
                    @for (venue, entries) in &group.venues {
                        div class="mb-8" {
                            h4 class="text-xl font-bold text-gray-800 mb-4 uppercase tracking-wider" {
                                (venue.heading())
                            }
                            div class="bg-white rounded-xl shadow-sm border border-gray-100 px-6" {
                                @for publication in entries {
                                    (render_publication(publication))
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn render_publication(publication: &Publication) -> Markup {
    html! {
        div class="flex flex-col md:flex-row gap-6 py-6 border-b border-gray-100 last:border-0" {
            div class="flex-shrink-0 w-full md:w-48" {
                @if let Some(image) = publication.image() {
                    img src=(image_path("publications", image))
                        alt="Paper Thumbnail"
                        class="w-full h-28 object-cover rounded-lg shadow-sm border border-gray-200"
                        onerror=(image_fallback("https://placehold.co/300x200/e5e7eb/9ca3af?text=PAPER"));
                } @else {
                    div class="w-full h-28 bg-gray-50 rounded-lg border border-gray-200 flex items-center justify-center text-gray-400" {
                        span class="text-xs font-bold uppercase" { "No Image" }
                    }
                }
            }
            div class="flex-grow flex flex-col justify-center" {
                h4 class="text-lg font-bold text-gray-900 leading-snug mb-2" {
                    a href=(publication.url.as_deref().unwrap_or("#")) target="_blank" rel="noopener"
                        class="hover:text-gray-600 transition-colors hover:underline decoration-gray-400 underline-offset-2" {
                        (publication.title)
                    }
                }
                p class="text-gray-600 text-sm font-medium leading-relaxed" { (publication.authors) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, year: Option<i32>, kind: &str) -> Publication {
        Publication {
            title: title.to_string(),
            authors: "A. Author".to_string(),
            year,
            kind: Some(kind.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_years_descending() {
        let pubs = vec![
            paper("a", Some(2021), "journal"),
            paper("b", Some(2023), "journal"),
            paper("c", Some(2022), "journal"),
        ];
        let years: Vec<Option<i32>> = group_publications(&pubs).iter().map(|g| g.year).collect();
        assert_eq!(years, vec![Some(2023), Some(2022), Some(2021)]);
    }

    #[test]
    fn test_journals_before_conferences() {
        let pubs = vec![
            paper("conf", Some(2022), "Conference Paper"),
            paper("misc", Some(2022), "Workshop"),
            paper("jour", Some(2022), "Journal"),
        ];
        let groups = group_publications(&pubs);
        let venues: Vec<Venue> = groups[0].venues.iter().map(|(v, _)| *v).collect();
        assert_eq!(venues, vec![Venue::Journal, Venue::Conference, Venue::Other]);

        let html = render_publications(&pubs, "p.json").into_string();
        let journal = html.find("Journals").unwrap();
        let conference = html.find("Conferences").unwrap();
        assert!(journal < conference);
        assert!(html.find(">jour<").unwrap() < html.find(">conf<").unwrap());
    }

    #[test]
    fn test_undated_group_is_last() {
        let pubs = vec![paper("x", None, "journal"), paper("y", Some(2020), "journal")];
        let groups = group_publications(&pubs);
        assert_eq!(groups[0].label(), "2020");
        assert_eq!(groups[1].label(), "Unknown");
    }

    #[test]
    fn test_empty_message() {
        let html = render_publications(&[], "./data/publications/publications.json").into_string();
        assert!(html.contains("No publications found."));
    }
}
