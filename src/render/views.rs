//! Views for each wizard step
//!
//! Keys (`1.`, `2.` ...) in front of branches, subjects, marks and cards are
//! what the terminal front end accepts as shortcuts.

use crate::models::Catalog;
use crate::render::markup::roadmap_content;
use crate::render::ui::{Element, Node};
use crate::workflow::{ResultCard, ResultsView, RoadmapState, Wizard, WizardStep};

pub const NO_MATCHES_TITLE: &str = "No strong matches";
pub const NO_MATCHES_TEXT: &str =
    "None of the career profiles matched your marks strongly. Try adding subjects or updating your marks.";
pub const BACKEND_ERROR_TITLE: &str = "Backend Error";
pub const BACKEND_ERROR_TEXT: &str = "Could not connect to the analysis engine.";
pub const ROADMAP_LOADING_TEXT: &str = "Mapping your path...";
pub const ROADMAP_ERROR_TEXT: &str = "Failed to load roadmap.";
pub const ROADMAP_TRIGGER_TEXT: &str = "✨ Generate AI Career Path";

fn key(n: usize) -> Node {
    Element::new("small").class("key").text(format!("{}. ", n)).into()
}

/// Step indicator; steps up to the current one are active
pub fn stepper(wizard: &Wizard) -> Node {
    let current = wizard.step();
    Element::new("div")
        .class("stepper")
        .children(wizard.steps().into_iter().enumerate().map(|(i, step)| {
            let class = if step <= current { "step active" } else { "step" };
            Element::new("span")
                .class(class)
                .text(format!("{} {}  ", i + 1, step.title()))
                .into()
        }))
        .into()
}

/// Step 1: one button per branch
pub fn branch_step(catalog: &Catalog) -> Node {
    Element::new("section")
        .attr("id", "step-1")
        .child(Element::new("h2").text("Choose your branch"))
        .child(
            Element::new("div").class("branch-grid").children(
                catalog.branch_names().into_iter().enumerate().map(|(i, branch)| {
                    Element::new("button")
                        .class("branch-btn")
                        .attr("data-branch", branch)
                        .child(key(i + 1))
                        .text(branch)
                        .into()
                }),
            ),
        )
        .into()
}

/// Step 2: one checkbox chip per subject of the active list
pub fn subject_step(wizard: &Wizard) -> Node {
    let mut section = Element::new("section")
        .attr("id", "step-2")
        .child(Element::new("h2").text("Pick the subjects you have studied"));

    if let Some(branch) = &wizard.session().branch {
        section = section.child(
            Element::new("p")
                .attr("id", "selected-branch-label")
                .text(format!("Branch: {}", branch)),
        );
    }

    section = section.child(
        Element::new("div").attr("id", "subject-grid").children(
            wizard.toggles().iter().enumerate().map(|(i, toggle)| {
                Element::new("label")
                    .class("chip")
                    .child(
                        Element::new("input")
                            .attr("type", "checkbox")
                            .class("sub-check")
                            .attr("value", toggle.subject.as_str())
                            .flag_if("checked", toggle.checked),
                    )
                    .child(key(i + 1))
                    .child(Element::new("span").text(toggle.subject.as_str()))
                    .into()
            }),
        ),
    );

    with_notice(section, wizard).into()
}

/// Step 3: one number field per selected subject
pub fn marks_step(wizard: &Wizard) -> Node {
    let section = Element::new("section")
        .attr("id", "step-3")
        .child(Element::new("h2").text("Enter your marks (0-100)"))
        .child(
            Element::new("div").attr("id", "marks-container").children(
                wizard.mark_inputs().iter().enumerate().map(|(i, input)| {
                    Element::new("label")
                        .class("mark-input-group")
                        .child(key(i + 1))
                        .child(Element::new("span").text(input.subject.as_str()))
                        .child(
                            Element::new("input")
                                .attr("type", "number")
                                .class("mark-val")
                                .attr("data-sub", input.subject.as_str())
                                .attr("placeholder", "0")
                                .attr("min", "0")
                                .attr("max", "100")
                                .attr("value", input.value.as_str()),
                        )
                        .into()
                }),
            ),
        );

    with_notice(section, wizard).into()
}

fn with_notice(section: Element, wizard: &Wizard) -> Element {
    match wizard.notice() {
        Some(notice) => section.child(Element::new("p").class("notice").text(notice)),
        None => section,
    }
}

/// Step 4: loading indicator, cards, no-match message or error card
pub fn results_view(view: &ResultsView) -> Node {
    let container = Element::new("div").attr("id", "resultsContainer");

    let container = match view {
        ResultsView::Loading { branch } => {
            let label = match branch {
                Some(branch) => format!("Analyzing {} Profile...", branch),
                None => "Analyzing Profile...".to_string(),
            };
            container.child(
                Element::new("div")
                    .class("loader")
                    .child(Element::new("span").class("spinner"))
                    .text(label),
            )
        }
        ResultsView::Board(board) => container.children(board.cards().iter().map(career_card)),
        ResultsView::NoMatches => container.child(
            Element::new("div")
                .class("career-card no-matches")
                .child(Element::new("h3").text(NO_MATCHES_TITLE))
                .child(Element::new("p").text(NO_MATCHES_TEXT)),
        ),
        ResultsView::Failed { reason } => container.child(
            Element::new("div")
                .class("career-card backend-error")
                .child(Element::new("h3").text(BACKEND_ERROR_TITLE))
                .child(Element::new("p").text(BACKEND_ERROR_TEXT))
                .child(Element::new("p").class("error-detail").text(reason.as_str())),
        ),
    };

    container.into()
}

/// One result card with its roadmap trigger and box
pub fn career_card(card: &ResultCard) -> Node {
    let prediction = &card.prediction;
    let card_id = card.card_id();

    let mut element = Element::new("div")
        .class("career-card")
        .child(key(card.index + 1))
        .child(
            Element::new("div")
                .class("card-header")
                .child(
                    Element::new("div")
                        .child(Element::new("h4").text("Target Role"))
                        .child(
                            Element::new("h3")
                                .class("role")
                                .text(prediction.role.as_str()),
                        ),
                )
                .child(
                    Element::new("div")
                        .child(Element::new("h4").text("Probability"))
                        .child(
                            Element::new("span")
                                .class("prob-value")
                                .text(format!("{}%", prediction.prob)),
                        ),
                ),
        );

    if let Some(algo) = &prediction.algo {
        element = element.child(Element::new("p").class("algo-note").text(algo.as_str()));
    }

    element
        .child(
            Element::new("div").class("prob-bar-bg").child(
                Element::new("div")
                    .class("prob-bar-fill")
                    .attr("style", format!("width: {}%", prediction.prob.bar_width())),
            ),
        )
        .child(
            Element::new("button")
                .class("btn-ai-roadmap")
                .attr("id", format!("btn-{}", card_id))
                .flag_if("disabled", !card.roadmap.trigger_enabled())
                .text(ROADMAP_TRIGGER_TEXT),
        )
        .child(roadmap_box(&card_id, &card.roadmap))
        .into()
}

/// Roadmap output area; hidden until first requested
pub fn roadmap_box(card_id: &str, state: &RoadmapState) -> Element {
    let base = Element::new("div")
        .attr("id", card_id)
        .class("ai-roadmap-box");

    match state {
        RoadmapState::Idle => base.flag("hidden"),
        RoadmapState::Loading => base
            .child(Element::new("span").class("spinner"))
            .text(ROADMAP_LOADING_TEXT),
        RoadmapState::Done(advice) => base.child(roadmap_content(advice)),
        RoadmapState::Failed(reason) => base.child(
            Element::new("span")
                .class("roadmap-error")
                .text(format!("{} {}", ROADMAP_ERROR_TEXT, reason)),
        ),
    }
}

/// View of whatever step is active
pub fn current_step(wizard: &Wizard) -> Node {
    match wizard.step() {
        WizardStep::BranchSelect => branch_step(wizard.catalog()),
        WizardStep::SubjectSelect => subject_step(wizard),
        WizardStep::MarksEntry => marks_step(wizard),
        WizardStep::Results => match wizard.results() {
            Some(view) => results_view(view),
            None => Element::new("div").attr("id", "resultsContainer").into(),
        },
    }
}

/// Stepper plus active step
pub fn page(wizard: &Wizard) -> Node {
    Element::new("main")
        .class("assessment")
        .child(stepper(wizard))
        .child(current_step(wizard))
        .into()
}

/// Stand-alone HTML document of the current page
pub fn report_document(wizard: &Wizard, generated_at: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>PathFinder Results</title></head><body>{}{}</body></html>\n",
        Node::from(
            Element::new("p")
                .class("generated-at")
                .text(format!("Generated {}", generated_at))
        )
        .to_html(),
        page(wizard).to_html()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CareerPrediction, CatalogMode, Probability, RoadmapContext};
    use crate::workflow::ResultsBoard;

    fn two_cards() -> ResultsBoard {
        ResultsBoard::new(
            1,
            RoadmapContext::default(),
            vec![
                CareerPrediction {
                    role: "Data Analyst".to_string(),
                    prob: Probability(82.0),
                    algo: None,
                },
                CareerPrediction {
                    role: "ML Engineer".to_string(),
                    prob: Probability(77.0),
                    algo: Some("KNN: Cluster Beta".to_string()),
                },
            ],
        )
    }

    #[test]
    fn test_cards_render_in_order_with_hidden_boxes() {
        let node = results_view(&ResultsView::Board(two_cards()));
        let cards = node.find_by_class("career-card");
        assert_eq!(cards.len(), 2);

        let first = Node::Element(cards[0].clone());
        let second = Node::Element(cards[1].clone());
        assert_eq!(
            first.find_by_class("role")[0].children,
            vec![Node::text("Data Analyst")]
        );
        assert_eq!(
            Node::Element(first.find_by_class("prob-value")[0].clone()).text_content(),
            "82%"
        );
        assert_eq!(
            Node::Element(second.find_by_class("prob-value")[0].clone()).text_content(),
            "77%"
        );

        for card in [&first, &second] {
            let boxes = card.find_by_class("ai-roadmap-box");
            assert_eq!(boxes.len(), 1);
            assert!(boxes[0].has_attr("hidden"));
            assert!(!card.find_by_class("btn-ai-roadmap")[0].has_attr("disabled"));
        }

        let html = node.to_html();
        assert!(html.find("Data Analyst").unwrap() < html.find("ML Engineer").unwrap());
        assert!(html.contains("id=\"roadmap-1\""));
        assert!(html.contains("KNN: Cluster Beta"));
        assert!(html.contains("<h3 class=\"role\">Data Analyst</h3>"));
    }

    #[test]
    fn test_no_matches_is_not_an_error() {
        let html = results_view(&ResultsView::NoMatches).to_html();
        assert!(html.contains(NO_MATCHES_TITLE));
        assert!(!html.contains(BACKEND_ERROR_TITLE));
    }

    #[test]
    fn test_failure_renders_error_card() {
        let html = results_view(&ResultsView::Failed {
            reason: "HTTP 500".to_string(),
        })
        .to_html();
        assert!(html.contains(BACKEND_ERROR_TITLE));
        assert!(html.contains(BACKEND_ERROR_TEXT));
        assert!(html.contains("HTTP 500"));
        assert!(!html.contains(NO_MATCHES_TITLE));
    }

    #[test]
    fn test_roadmap_box_states() {
        let loading = Node::from(roadmap_box("roadmap-0", &RoadmapState::Loading));
        assert!(loading.to_text().contains(ROADMAP_LOADING_TEXT));

        let done = Node::from(roadmap_box(
            "roadmap-0",
            &RoadmapState::Done("**Learn Go**\n* Build a cache\n* Write tests".to_string()),
        ));
        assert_eq!(
            done.to_html(),
            "<div id=\"roadmap-0\" class=\"ai-roadmap-box\"><div class=\"roadmap-content\">\
             <strong>Learn Go</strong><br>• Build a cache<br>• Write tests</div></div>"
        );

        let failed = Node::from(roadmap_box("roadmap-0", &RoadmapState::Failed("timeout".into())));
        assert_eq!(failed.to_text(), "Failed to load roadmap. timeout");
    }

    #[test]
    fn test_loading_card_disables_trigger() {
        let mut board = two_cards();
        board.begin_roadmap(1).unwrap();
        let node = results_view(&ResultsView::Board(board));
        let buttons = node.find_by_class("btn-ai-roadmap");
        assert!(!buttons[0].has_attr("disabled"));
        assert!(buttons[1].has_attr("disabled"));
    }

    #[test]
    fn test_subject_names_are_escaped() {
        let mut wizard = Wizard::new(Catalog::Flat(vec!["<b>C++</b>".to_string()]));
        wizard.toggle_subject("<b>C++</b>", true).unwrap();
        let html = subject_step(&wizard).to_html();
        assert!(html.contains("&lt;b&gt;C++&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_subject_step_shows_notice() {
        let mut wizard = Wizard::new(Catalog::builtin(CatalogMode::Branched));
        wizard.select_branch("ECE").unwrap();
        let _ = wizard.proceed_to_marks();
        let text = subject_step(&wizard).to_text();
        assert!(text.contains("Branch: ECE"));
        assert!(text.contains("[ ] 1. VLSI Design"));
        assert!(text.ends_with("Please select at least one subject."));
    }

    #[test]
    fn test_stepper_marks_progress() {
        let mut wizard = Wizard::new(Catalog::builtin(CatalogMode::Branched));
        wizard.select_branch("CSE").unwrap();
        let node = stepper(&wizard);
        assert_eq!(node.find_by_class("active").len(), 2);
        assert_eq!(node.find_by_class("step").len(), 4);
    }

    #[test]
    fn test_report_document() {
        let wizard = Wizard::new(Catalog::builtin(CatalogMode::Flat));
        let doc = report_document(&wizard, "2026-01-01 10:00:00");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("Generated 2026-01-01 10:00:00"));
        assert!(doc.contains("id=\"step-2\""));
    }
}
