use super::*;

fn cite(title: &str, page: u32) -> Citation {
    Citation::new(
        format!("id-{}", title.to_lowercase()),
        title,
        page,
        format!("{title} page {page} text"),
    )
}

#[test]
fn test_exact_match_beats_earlier_fallback() {
    let available = vec![cite("A", 1), cite("A", 2)];
    let used = extract_used_citations("Costs fell sharply [A, p.2].", &available);
    assert_eq!(used, vec![cite("A", 2)]);
}

#[test]
fn test_fallback_resolves_by_title() {
    let available = vec![cite("A", 5)];
    let used = extract_used_citations("Claim [A, p.9].", &available);
    assert_eq!(used, vec![cite("A", 5)]);
}

#[test]
fn test_fallback_uses_first_title_match_in_list_order() {
    let available = vec![cite("B", 1), cite("A", 7), cite("A", 3)];
    let report = attribute_citations("See [A, p.1].", &available);
    assert_eq!(report.used, vec![cite("A", 7)]);
    assert_eq!(
        report.markers[0].resolution,
        Some(Resolution {
            index: 1,
            kind: MatchKind::TitleFallback
        })
    );
    assert_eq!(report.fallback_count(), 1);
}

#[test]
fn test_unknown_source_is_dropped() {
    let available = vec![cite("A", 1)];
    let report = attribute_citations("Invented [Imaginary Study, p.4].", &available);
    assert!(report.used.is_empty());
    let unresolved: Vec<_> = report.unresolved().map(|m| m.raw.as_str()).collect();
    assert_eq!(unresolved, vec!["[Imaginary Study, p.4]"]);
}

#[test]
fn test_title_match_is_case_insensitive() {
    let available = vec![cite("Annual Report 2023.pdf", 12)];
    let used = extract_used_citations("[annual report 2023.PDF, p.12]", &available);
    assert_eq!(used.len(), 1);
}

#[test]
fn test_duplicates_collapse_in_first_occurrence_order() {
    let available = vec![cite("A", 1), cite("B", 2), cite("C", 3)];
    let text = "[C, p.3] then [A, p.1], again [C, p.3] and [A, p.8].";
    let used = extract_used_citations(text, &available);
    // [A, p.8] falls back to A p.1, which is already listed
    assert_eq!(used, vec![cite("C", 3), cite("A", 1)]);
}

#[test]
fn test_same_identity_from_different_chunks_listed_once() {
    let mut second = cite("A", 1);
    second.chunk_text = "another chunk of the same page".to_string();
    let available = vec![cite("A", 1), second];
    let used = extract_used_citations("[A, p.1] and [A, p.1]", &available);
    assert_eq!(used, vec![cite("A", 1)]);
}

#[test]
fn test_marker_whitespace_variants() {
    let available = vec![cite("Plan", 4)];
    for text in ["[Plan, p.4]", "[Plan,p.4]", "[Plan, p. 4]", "[ Plan ,  p.  4]"] {
        assert_eq!(
            extract_used_citations(text, &available),
            vec![cite("Plan", 4)],
            "marker {text:?} should resolve"
        );
    }
}

#[test]
fn test_malformed_markers_are_ignored() {
    let available = vec![cite("A", 1)];
    for text in [
        "[A, p.]",
        "[A, p.x]",
        "[A, page 1]",
        "[A, p.1",
        "[, p.1]",
        "[A, p.99999999999999]",
    ] {
        assert!(
            extract_markers(text).is_empty(),
            "{text:?} should not parse as a marker"
        );
        assert!(extract_used_citations(text, &available).is_empty());
    }
}

#[test]
fn test_title_may_contain_commas() {
    let markers = extract_markers("As reported [Report, Volume 2, p.14].");
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].title, "Report, Volume 2");
    assert_eq!(markers[0].page, 14);
}

#[test]
fn test_markers_in_text_order_with_offsets() {
    let text = "x [B, p.2] y [A, p.1]";
    let markers = extract_markers(text);
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].title, "B");
    assert_eq!(&text[markers[0].start..markers[0].end], "[B, p.2]");
    assert_eq!(markers[1].title, "A");
    assert_eq!(&text[markers[1].start..markers[1].end], "[A, p.1]");
}

#[test]
fn test_attribution_is_deterministic() {
    let available = vec![cite("A", 1), cite("A", 2), cite("B", 9)];
    let text = "[B, p.1] [A, p.2] [A, p.3] [Z, p.1]";
    let first = attribute_citations(text, &available);
    let second = attribute_citations(text, &available);
    assert_eq!(first, second);
    // [A, p.3] falls back to the first A entry, a distinct (title, page)
    assert_eq!(first.used, vec![cite("B", 9), cite("A", 2), cite("A", 1)]);
}

#[test]
fn test_no_markers_no_citations() {
    let available = vec![cite("A", 1)];
    let report = attribute_citations("Plain prose without sources.", &available);
    assert!(report.used.is_empty());
    assert!(report.markers.is_empty());
}

#[test]
fn test_rank_candidates_prefers_exact() {
    let marker = extract_markers("[A, p.2]").remove(0);
    let available = vec![cite("A", 1), cite("B", 2), cite("A", 2)];
    assert_eq!(
        rank_candidates(&marker, &available),
        Some(Resolution {
            index: 2,
            kind: MatchKind::Exact
        })
    );
    assert_eq!(rank_candidates(&marker, &[]), None);
}

#[test]
fn test_inline_and_short_formats() {
    let citation = cite("Annual Report 2023", 12);
    assert_eq!(citation.to_inline_format(), "[Annual Report 2023, p.12]");
    assert_eq!(citation.to_short_format(), "[Annual Report 2023]");

    // Inline format round-trips through the marker grammar
    let used = extract_used_citations(&citation.to_inline_format(), &[citation.clone()]);
    assert_eq!(used, vec![citation]);
}

#[test]
fn test_snippet_truncates_on_char_boundary() {
    let mut citation = cite("A", 1);
    citation.chunk_text = "héllo wörld".to_string();
    assert_eq!(citation.snippet(5), "héllo...");
    assert_eq!(citation.snippet(11), "héllo wörld");
    assert_eq!(citation.snippet(50), "héllo wörld");
}

#[test]
fn test_citation_json_omits_missing_optionals() {
    let json = serde_json::to_value(cite("A", 1)).unwrap();
    assert!(json.get("chunk_id").is_none());
    assert!(json.get("relevance_score").is_none());

    let parsed: Citation = serde_json::from_str(
        r#"{"document_id":"d","document_title":"T","page_number":3,"chunk_text":"x","relevance_score":0.5}"#,
    )
    .unwrap();
    assert_eq!(parsed.relevance_score, Some(0.5));
    assert_eq!(parsed.chunk_id, None);
}
