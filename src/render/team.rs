//! Team page and member profiles.

use maud::{html, Markup};

use super::{empty_notice, image_fallback, image_path, page_shell};
use crate::data::model::{DetailData, DetailSection, Member, MemberLink};

/// Display order of position categories. Anything else ranks last.
pub const POSITION_ORDER: &[&str] = &[
    "Principal Investigator",
    "Researcher",
    "PhD Student",
    "Masters Student",
    "Undergraduate Student",
    "Visiting Scholar",
    "Alumni",
];

const UNRANKED: usize = 99;

pub fn position_rank(position: &str) -> usize {
    POSITION_ORDER
        .iter()
        .position(|p| *p == position)
        .map_or(UNRANKED, |i| i + 1)
}

/// Members sharing a position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionGroup {
    pub position: String,
    pub members: Vec<Member>,
}

/// Members grouped by position in display order.
///
/// Rebuilt from fresh data every time the team page renders and kept only
/// so profile requests can find the member they refer to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRoster {
    groups: Vec<PositionGroup>,
}

impl TeamRoster {
    pub fn from_members(members: Vec<Member>) -> Self {
        let mut groups: Vec<PositionGroup> = Vec::new();
        for member in members {
            let position = member.position_or_other().to_string();
            match groups.iter_mut().find(|g| g.position == position) {
                Some(group) => group.members.push(member),
                None => groups.push(PositionGroup {
                    position,
                    members: vec![member],
                }),
            }
        }
        // Stable: unranked positions keep their first-appearance order.
        groups.sort_by_key(|g| position_rank(&g.position));
        Self { groups }
    }

    pub fn groups(&self) -> &[PositionGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Looks a member up by email, or by name for members without one.
    pub fn find(&self, id: &str) -> Option<&Member> {
        self.groups
            .iter()
            .flat_map(|g| g.members.iter())
            .find(|m| m.id() == id)
    }
}

pub fn render_team(roster: &TeamRoster, data_path: &str) -> Markup {
    if roster.is_empty() {
        return empty_notice("Our Team", "team data available", data_path);
    }

    page_shell(
        "Our Team",
        html! {
            @for group in roster.groups() {
                div class="pt-8" {
                    h3 class="text-2xl font-bold text-gray-800 mb-6 border-b pb-2 border-gray-300" {
                        (group.position)
                    }
                    div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-6" {
                        @for member in &group.members {
                            (render_member_card(member))
                        }
                    }
                }
            }
        },
    )
}

fn render_member_card(member: &Member) -> Markup {
    html! {
        div data-member-id=(member.id())
            class="cursor-pointer group bg-white p-4 rounded-xl shadow-md hover:shadow-xl transition-all duration-300 border border-gray-200 flex flex-col items-center text-center transform hover:-translate-y-1" {
            div class="relative w-48 h-48 mb-4" {
                (render_portrait(member, "w-full h-full object-contain rounded-md shadow-sm"))
            }
            h3 class="text-xl font-bold text-gray-900 leading-tight" { (member.name) }
            p class="text-sm font-medium text-gray-500 mt-2" { (member.years.as_deref().unwrap_or("")) }
            p class="text-xs text-blue-600 mt-3 font-semibold opacity-0 group-hover:opacity-100 transition-opacity duration-300" {
                "View Profile →"
            }
        }
    }
}

fn render_portrait(member: &Member, img_class: &str) -> Markup {
    let initials = member.initials();
    html! {
        @if let Some(photo) = member.photo.as_deref().filter(|p| !p.is_empty()) {
            img src=(image_path("team", photo))
                alt=(member.name)
                class=(img_class)
                onerror=(image_fallback(&format!("https://placehold.co/200/e5e7eb/9ca3af?text={}", initials)));
        } @else {
            div class="w-full h-full rounded-md bg-gray-100 flex items-center justify-center text-4xl text-gray-500 font-bold border border-gray-200" {
                (initials)
            }
        }
    }
}

/// Full profile shown in the team modal.
pub fn render_member_detail(member: &Member) -> Markup {
    html! {
        div class="flex flex-col sm:flex-row sm:items-start gap-8" {
            div class="sm:w-1/3 flex flex-col items-center sm:items-start space-y-6" {
                div class="h-48 w-48 bg-gray-100 rounded-lg overflow-hidden border border-gray-200 shadow-sm mx-auto sm:mx-0" {
                    (render_portrait(member, "h-full w-full object-contain"))
                }
                div class="w-full flex flex-col items-start space-y-2" {
                    @if let Some(email) = member.email.as_deref().filter(|e| !e.is_empty()) {
                        div class="mb-2 text-sm" {
                            span class="font-bold text-gray-900 mr-1" { "Email:" }
                            a href=(format!("mailto:{}", email)) class="text-blue-600 hover:underline break-all" {
                                (email)
                            }
                        }
                    }
                    @for link in &member.links {
                        (render_link(link))
                    }
                }
            }

            div class="sm:w-2/3 w-full text-left" {
                div class="border-b border-gray-200 pb-3 mb-4" {
                    h3 class="text-3xl font-bold text-gray-900 leading-tight" { (member.name) }
                    p class="text-lg text-black font-semibold mt-1" { (member.position_or_other()) }
                    p class="text-sm text-gray-500" { (member.years.as_deref().unwrap_or("")) }
                }
                div class="max-h-[60vh] overflow-y-auto pr-2 custom-scrollbar" {
                    section class="mb-6" {
                        h4 class="text-xs font-bold text-gray-400 uppercase tracking-wider mb-2 border-b border-gray-100 pb-1" {
                            "Overview"
                        }
                        p class="text-gray-700 leading-relaxed text-sm" {
                            (member.bio.as_deref().filter(|b| !b.is_empty()).unwrap_or("No biography available."))
                        }
                    }
                    @for section in &member.details {
                        (render_section(section))
                    }
                }
            }
        }
    }
}

fn render_link(link: &MemberLink) -> Markup {
    let text = if link.is_pdf() { "Download PDF" } else { "Visit Link" };
    html! {
        div class="mb-3 flex items-center text-sm" {
            span class="font-bold text-gray-900 w-32 shrink-0" { (link.label) }
            a href=(link.url) target="_blank" rel="noopener"
                class="inline-flex items-center text-blue-600 hover:text-blue-800 font-medium hover:underline" {
                (text)
            }
        }
    }
}

fn render_section(section: &DetailSection) -> Markup {
    html! {
        section class="mb-6 last:mb-0" {
            h4 class="text-xs font-bold text-gray-400 uppercase tracking-wider mb-3 border-b border-gray-100 pb-1" {
                (section.heading)
            }
            @match &section.data {
                DetailData::Text(text) => {
                    p class="text-gray-700 leading-relaxed" { (text) }
                }
                DetailData::Items(items) => {
                    ul {
                        @for item in items {
                            li class="mb-2 flex items-start text-gray-700" {
                                span class="mr-2 text-black mt-1" { "•" }
                                (item)
                            }
                        }
                    }
                }
                DetailData::Entries(entries) => {
                    ul {
                        @for entry in entries {
                            li class="mb-3 last:mb-0" {
                                div class="flex justify-between items-start" {
                                    div {
                                        span class="block font-bold text-gray-900" { (entry.title) }
                                        @if let Some(subtitle) = &entry.subtitle {
                                            span class="block text-sm text-gray-600" { (subtitle) }
                                        }
                                    }
                                    @if let Some(date) = &entry.date {
                                        span class="text-sm font-medium text-gray-500 bg-gray-100 px-2 py-1 rounded whitespace-nowrap ml-2" {
                                            (date)
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                DetailData::Other(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member(name: &str, position: Option<&str>) -> Member {
        Member {
            name: name.to_string(),
            position: position.map(str::to_string),
            ..Default::default()
        }
    }

    fn group_order(roster: &TeamRoster) -> Vec<&str> {
        roster.groups().iter().map(|g| g.position.as_str()).collect()
    }

    #[test]
    fn test_groups_follow_position_order() {
        let roster = TeamRoster::from_members(vec![
            member("A", Some("PhD Student")),
            member("B", Some("Principal Investigator")),
            member("C", Some("Other")),
        ]);
        assert_eq!(
            group_order(&roster),
            vec!["Principal Investigator", "PhD Student", "Other"]
        );
    }

    #[test]
    fn test_unknown_positions_keep_first_appearance_order() {
        let roster = TeamRoster::from_members(vec![
            member("A", Some("Lab Manager")),
            member("B", None),
            member("C", Some("Alumni")),
            member("D", Some("Lab Manager")),
            member("E", Some("Researcher")),
        ]);
        assert_eq!(
            group_order(&roster),
            vec!["Researcher", "Alumni", "Lab Manager", "Other"]
        );
        assert_eq!(roster.groups()[2].members.len(), 2);
    }

    #[test]
    fn test_find_by_email_then_name() {
        let mut ada = member("Ada", Some("Researcher"));
        ada.email = Some("ada@lab.edu".into());
        let roster = TeamRoster::from_members(vec![ada, member("Alan", None)]);

        assert_eq!(roster.find("ada@lab.edu").map(|m| m.name.as_str()), Some("Ada"));
        assert!(roster.find("Ada").is_none());
        assert_eq!(roster.find("Alan").map(|m| m.name.as_str()), Some("Alan"));
        assert!(roster.find("nobody").is_none());
    }

    #[test]
    fn test_render_team_sections_in_order() {
        let roster = TeamRoster::from_members(vec![
            member("Student", Some("PhD Student")),
            member("Boss", Some("Principal Investigator")),
        ]);
        let html = render_team(&roster, "team.json").into_string();

        let pi = html.find("Principal Investigator").unwrap();
        let phd = html.find("PhD Student").unwrap();
        assert!(pi < phd);
        assert!(html.contains(r#"data-member-id="Boss""#));
        assert!(html.contains(">BS<") || html.contains(">B<"));
    }

    #[test]
    fn test_empty_roster_message() {
        let html = render_team(&TeamRoster::default(), "./data/team/team.json").into_string();
        assert!(html.contains("No team data available."));
        assert!(html.contains("./data/team/team.json"));
    }

    #[test]
    fn test_member_detail() {
        let member: Member = serde_json::from_value(json!({
            "name": "Grace Hopper",
            "position": "Researcher",
            "email": "grace@lab.edu",
            "links": [
                {"label": "CV", "url": "files/cv.PDF"},
                {"label": "Site", "url": "https://example.org"}
            ],
            "details": [
                {"heading": "Awards", "data": ["Medal <1>"]},
                {"heading": "Education", "data": [{"title": "PhD", "subtitle": "Yale", "date": "1934"}]}
            ]
        }))
        .unwrap();

        let html = render_member_detail(&member).into_string();

        assert!(html.contains("mailto:grace@lab.edu"));
        assert!(html.contains("Download PDF"));
        assert!(html.contains("Visit Link"));
        assert!(html.contains("No biography available."));
        assert!(html.contains("Medal &lt;1&gt;"));
        assert!(html.contains("Yale"));
        assert!(html.contains("1934"));
        assert!(html.contains(">GH<"));
    }
}
