use std::path::Path;
use std::sync::Arc;

use crate::paginator::{self, PageLink};
use crate::results::{Category, Dataset, FeaturedImage, Platform, SearchResult, VirtualTab};
use crate::session::Session;
use crate::tracking::{MemoryTracker, TrackEvent};

fn result(i: usize, platform: Platform) -> SearchResult {
    SearchResult {
        id: format!("r{i}"),
        platform,
        display_name: format!("Person {i}"),
        title: format!("Result {i}"),
        url: format!("https://example.com/{i}"),
        snippet: String::new(),
        location: None,
        date: None,
        image: None,
    }
}

/// LinkedIn, Facebook, Web, LinkedIn, Facebook, Web, ...
fn results(n: usize) -> Vec<SearchResult> {
    let cycle = [Platform::LinkedIn, Platform::Facebook, Platform::Web];
    (0..n).map(|i| result(i, cycle[i % cycle.len()])).collect()
}

fn dataset(n: usize) -> Dataset {
    Dataset {
        scenario: "tanisha".to_string(),
        subject: "Tanisha Jefferson".to_string(),
        results: results(n),
        featured_images: vec![FeaturedImage {
            id: "img-1".to_string(),
            title: "Tanisha Jefferson - LinkedIn".to_string(),
            source: "LinkedIn".to_string(),
            image_url: "https://img.example/1.jpg".to_string(),
        }],
        related_searches: [(
            "Tanisha Jefferson".to_string(),
            vec!["Tanisha Jefferson Atlanta".to_string()],
        )]
        .into_iter()
        .collect(),
        avatar_overrides: Vec::new(),
    }
}

fn session(n: usize, page_size: usize) -> (Session, MemoryTracker) {
    let tracker = MemoryTracker::new();
    let s = Session::new(Arc::new(dataset(n)), page_size, Box::new(tracker.clone())).unwrap();
    (s, tracker)
}

fn ids(items: &[&SearchResult]) -> Vec<String> {
    items.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn filter_all_is_identity() {
    let all = results(23);
    let filtered = paginator::filter_by_category(&all, &Category::All);
    assert_eq!(filtered.len(), all.len());
    assert!(filtered.iter().zip(all.iter()).all(|(a, b)| *a == b));
}

#[test]
fn virtual_and_unrecognized_categories_pass_through() {
    let all = results(7);
    for tab in VirtualTab::ALL {
        assert_eq!(
            paginator::filter_by_category(&all, &Category::Virtual(tab)).len(),
            7
        );
    }
    let unknown = Category::parse("Podcasts");
    assert_eq!(paginator::filter_by_category(&all, &unknown).len(), 7);
}

#[test]
fn platform_filter_is_ordered_subsequence() {
    let all = results(10);
    for platform in Platform::ALL {
        let filtered = paginator::filter_by_category(&all, &Category::Platform(platform));
        assert!(filtered.iter().all(|r| r.platform == platform));

        let positions: Vec<usize> = filtered
            .iter()
            .map(|r| all.iter().position(|a| a.id == r.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let expected = all.iter().filter(|r| r.platform == platform).count();
        assert_eq!(filtered.len(), expected);
    }
    assert_eq!(
        ids(&paginator::filter_by_category(
            &all,
            &Category::Platform(Platform::Facebook)
        )),
        vec!["r1", "r4", "r7"]
    );
    assert!(
        paginator::filter_by_category(&all, &Category::Platform(Platform::TikTok)).is_empty()
    );
}

#[test]
fn page_length_matches_formula() {
    for len in [0usize, 1, 9, 10, 11, 23, 40] {
        let items: Vec<usize> = (0..len).collect();
        for size in [1usize, 3, 10] {
            for page in 1..=6 {
                let expected = size.min(len.saturating_sub((page - 1) * size));
                assert_eq!(
                    paginator::paginate(&items, page, size).visible.len(),
                    expected,
                    "len={len} size={size} page={page}"
                );
            }
        }
    }
}

#[test]
fn pages_cover_every_item_once() {
    let all = results(23);
    let filtered = paginator::filter_by_category(&all, &Category::All);
    let total = paginator::paginate(&filtered, 1, 10).total_pages;
    let mut seen: Vec<String> = Vec::new();
    for p in 1..=total {
        seen.extend(ids(paginator::paginate(&filtered, p, 10).visible));
    }
    assert_eq!(seen, ids(&filtered));
}

#[test]
fn twenty_three_results_make_three_pages() {
    let all = results(23);
    let filtered = paginator::filter_by_category(&all, &Category::All);
    let first = paginator::paginate(&filtered, 1, 10);
    assert_eq!(first.total_pages, 3);
    assert_eq!(ids(first.visible), ids(&filtered[0..10]));
    let last = paginator::paginate(&filtered, 3, 10);
    assert_eq!(ids(last.visible), vec!["r20", "r21", "r22"]);
}

#[test]
fn long_sequences_are_bounded_and_anchored() {
    for total in 11..=40 {
        for current in 1..=total {
            let seq = paginator::compute_page_number_sequence(current, total);
            assert_eq!(seq.first(), Some(&PageLink::Number(1)));
            assert_eq!(seq.last(), Some(&PageLink::Number(total)));
            assert!(seq.len() <= paginator::MAX_VISIBLE_PAGES);

            let numbers: Vec<usize> = seq.iter().filter_map(|l| l.number()).collect();
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            assert!(
                numbers.contains(&current) || current <= 4 || current >= total - 3,
                "current={current} total={total}"
            );
        }
    }
}

#[test]
fn sequence_concrete_cases_render_like_the_page_bar() {
    let render = |current, total| {
        paginator::compute_page_number_sequence(current, total)
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(",")
    };
    assert_eq!(render(1, 20), "1,2,3,4,5,...,20");
    assert_eq!(render(10, 20), "1,...,9,10,11,...,20");
    assert_eq!(render(19, 20), "1,...,16,17,18,19,20");
}

#[test]
fn category_change_resets_page() {
    let (mut s, _) = session(40, 10);
    assert_eq!(s.go_to_page(4), 4);
    s.select_category(Category::Platform(Platform::LinkedIn));
    assert_eq!(s.state().current_page, 1);

    s.go_to_page(2);
    s.select_category(Category::Virtual(VirtualTab::News));
    assert_eq!(s.state().current_page, 1);
    s.select_category(Category::Virtual(VirtualTab::News));
    assert_eq!(s.state().current_page, 1);
}

#[test]
fn reselecting_active_tab_resets_page_without_event() {
    let (mut s, tracker) = session(23, 10);
    s.go_to_page(3);
    s.select_category(Category::All);
    assert_eq!(s.state().current_page, 1);

    s.select_category(Category::Platform(Platform::LinkedIn));
    s.select_category(Category::Platform(Platform::LinkedIn));
    assert_eq!(tracker.names(), vec!["pagination", "tab_change"]);
}

#[test]
fn go_to_page_clamps_to_filtered_range() {
    let (mut s, _) = session(23, 10);
    assert_eq!(s.go_to_page(99), 3);
    assert_eq!(s.go_to_page(0), 1);

    s.select_category(Category::Platform(Platform::Instagram));
    assert_eq!(s.total_pages(), 0);
    assert_eq!(s.go_to_page(5), 1);
}

#[test]
fn pagination_events_only_for_changes_past_first_page() {
    let (mut s, tracker) = session(23, 10);
    s.start();
    s.go_to_page(1);
    s.go_to_page(2);
    s.go_to_page(2);
    s.previous_page();
    assert!(s.next_page());
    assert!(s.next_page());
    assert!(!s.next_page());

    let pages: Vec<usize> = tracker
        .events()
        .into_iter()
        .filter_map(|e| match e {
            TrackEvent::Pagination { page, .. } => Some(page),
            _ => None,
        })
        .collect();
    assert_eq!(pages, vec![2, 2, 3]);
    assert_eq!(tracker.names()[0], "page_view");
}

#[test]
fn tab_change_and_search_are_tracked_with_scenario() {
    let (mut s, tracker) = session(5, 10);
    s.select_category(Category::parse("facebook"));
    s.search("  Tanisha J ");
    assert_eq!(
        tracker.events(),
        vec![
            TrackEvent::TabChange {
                scenario: "tanisha".to_string(),
                tab: "Facebook".to_string(),
            },
            TrackEvent::Search {
                scenario: "tanisha".to_string(),
                query: "Tanisha J".to_string(),
            },
        ]
    );
}

#[test]
fn only_linkedin_and_facebook_open_profiles() {
    let (mut s, tracker) = session(6, 10);
    assert!(s.open_result("r0"));
    assert_eq!(s.selected().map(|r| r.id.as_str()), Some("r0"));
    assert!(s.view().profile.is_some());

    s.close_profile();
    assert!(!s.open_result("r2"));
    assert!(s.selected().is_none());

    assert!(!s.open_result("missing"));
    assert_eq!(tracker.names(), vec!["result_click", "result_click"]);
}

#[test]
fn view_hides_controls_for_single_page() {
    let (s, _) = session(10, 10);
    let view = s.view();
    assert_eq!(view.total_pages, 1);
    assert!(view.page_links.is_empty());
    assert!(!view.has_next && !view.has_previous);
}

#[test]
fn view_panels_follow_page_and_tab() {
    let (mut s, _) = session(23, 10);
    let first = s.view();
    assert_eq!(first.featured_images.len(), 1);
    assert_eq!(first.related_searches, vec!["Tanisha Jefferson Atlanta"]);
    assert_eq!(first.page_links.len(), 3);
    assert!(first.tabs.iter().any(|t| t.active && t.label == "All"));

    s.go_to_page(2);
    let second = s.view();
    assert!(second.featured_images.is_empty());
    assert!(second.has_previous && second.has_next);

    s.select_category(Category::Platform(Platform::LinkedIn));
    let linkedin = s.view();
    assert_eq!(linkedin.total_results, 8);
    assert!(linkedin.related_searches.is_empty());
    assert!(linkedin.results.iter().all(|c| c.result.platform == Platform::LinkedIn));

    s.select_category(Category::Platform(Platform::YouTube));
    let empty = s.view();
    assert_eq!(empty.total_results, 0);
    assert!(empty.results.is_empty());
    assert!(empty.featured_images.is_empty());
    assert!(!empty.empty_dataset);
}

#[test]
fn empty_dataset_renders_no_results_page() {
    let (s, _) = session(0, 10);
    let view = s.view();
    assert!(view.empty_dataset);
    assert!(view.results.is_empty());
    colored::control::set_override(false);
    let text = String::from_utf8(crate::output::render_text(&view)).unwrap();
    assert!(text.contains("No results found"));
}

#[test]
fn zero_page_size_is_rejected() {
    let err = Session::new(
        Arc::new(dataset(3)),
        0,
        Box::new(crate::tracking::NullTracker),
    );
    assert!(err.is_err());
}

#[test]
fn thumbnails_prefer_explicit_image_then_generated() {
    let mut ds = dataset(2);
    ds.results[0].image = Some("https://img.example/own.jpg".to_string());
    let s = Session::new(Arc::new(ds), 10, Box::new(crate::tracking::NullTracker)).unwrap();
    let view = s.view();
    assert_eq!(view.results[0].thumbnail_url, "https://img.example/own.jpg");
    assert_eq!(
        view.results[1].thumbnail_url,
        "https://api.dicebear.com/7.x/personas/png?seed=r1&size=150"
    );
}

#[test]
fn json_output_uses_dots_for_ellipsis() {
    let (mut s, _) = session(200, 10);
    s.go_to_page(10);
    let json: serde_json::Value =
        serde_json::from_slice(&crate::output::render_json(&s.view())).unwrap();
    assert_eq!(
        json["page_links"],
        serde_json::json!([1, "...", 9, 10, 11, "...", 20])
    );
    assert_eq!(json["results"][0]["id"], "r90");
}

#[test]
fn html_output_marks_active_page() {
    let (mut s, _) = session(23, 10);
    s.go_to_page(2);
    let html = String::from_utf8(crate::output::report::render_html(&s.view())).unwrap();
    assert!(html.contains(r#"<a class="page active" data-page="2">2</a>"#));
    assert!(html.contains("Previous"));
    assert!(html.contains("About 23 results"));
}

#[test]
fn dataset_loads_yaml_and_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(3);

    let yaml_path = dir.path().join("ds.yml");
    std::fs::write(&yaml_path, serde_yaml::to_string(&ds).unwrap()).unwrap();
    assert_eq!(Dataset::load(&yaml_path).unwrap().results, ds.results);

    let json_path = dir.path().join("ds.json");
    std::fs::write(&json_path, serde_json::to_string(&ds).unwrap()).unwrap();
    assert_eq!(Dataset::load(&json_path).unwrap().results.len(), 3);

    assert!(Dataset::load(&dir.path().join("missing.yml")).is_err());
}

#[test]
fn bundled_fixture_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/tanisha_jefferson.yml");
    let ds = Dataset::load(&path).unwrap();
    assert_eq!(ds.scenario, "tanisha");
    assert!(ds.results.len() > paginator::DEFAULT_PAGE_SIZE);
    assert!(ds.results.iter().any(|r| r.platform == Platform::LinkedIn));
    assert!(ds.results.iter().any(|r| r.platform == Platform::Facebook));
}
