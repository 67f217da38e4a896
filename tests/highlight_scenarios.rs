//! Locating and rendering scenarios through the public API.

use evidentia::prelude::*;

fn highlighted(result: &HighlightResult, color: HighlightColor) -> Vec<String> {
    result
        .plan
        .highlighted()
        .filter(|segment| segment.color == Some(color))
        .map(|segment| segment.text.clone())
        .collect()
}

#[test]
fn test_ordered_window_is_minimal() -> Result<()> {
    let highlighter = Highlighter::new(LocatorConfig::default());
    let text = "the quick brown fox jumps";

    let result = highlighter.highlight(text, &tokenize("quick fox")?, &TokenSet::default())?;

    assert_eq!(result.answer.strategy, Some(MatchStrategy::Ordered));
    assert_eq!(
        highlighted(&result, HighlightColor::AnswerMatch),
        vec!["quick brown fox"]
    );
    assert_eq!(result.plan.plain_text(), text);
    Ok(())
}

#[test]
fn test_out_of_order_falls_back_to_compact() -> Result<()> {
    let highlighter = Highlighter::new(LocatorConfig::default());

    let result = highlighter.highlight(
        "fox jumps quick",
        &TokenSet::new(["quick", "fox"]),
        &TokenSet::default(),
    )?;

    assert_eq!(result.answer.strategy, Some(MatchStrategy::Compact));
    assert_eq!(
        highlighted(&result, HighlightColor::AnswerMatch),
        vec!["fox jumps quick"]
    );
    Ok(())
}

#[test]
fn test_long_token_sets_skip_ordered() -> Result<()> {
    let words: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
    let text = words.join(" ");
    let tokens = TokenSet::new(words.iter().cloned());
    let locator = SpanLocator::new(LocatorConfig::default());

    let located = locator.locate(&text, &tokens)?;
    assert_eq!(located.strategy, Some(MatchStrategy::Compact));
    assert_eq!(located.spans.as_slice(), &[Span::new(0, text.len())]);

    // The same tokens are located in order once the limit allows it.
    let locator = SpanLocator::new(LocatorConfig::default().ordered_token_limit(21));
    assert_eq!(
        locator.locate(&text, &tokens)?.strategy,
        Some(MatchStrategy::Ordered)
    );
    Ok(())
}

#[test]
fn test_partial_coverage_lists_every_occurrence() -> Result<()> {
    let locator = SpanLocator::new(LocatorConfig::default());
    let text = "The fee is a fee, not a charge.";

    let located = locator.locate(text, &TokenSet::new(["fee", "ratio"]))?;

    assert_eq!(located.strategy, Some(MatchStrategy::AllOccurrences));
    let found: Vec<&str> = located.spans.iter().map(|s| &text[s.as_range()]).collect();
    assert_eq!(found, vec!["fee", "fee"]);
    Ok(())
}

#[test]
fn test_nothing_to_highlight() -> Result<()> {
    let highlighter = Highlighter::new(LocatorConfig::default());
    let text = "Nothing relevant here.";

    let result = highlighter.highlight(text, &tokenize("expense ratio")?, &TokenSet::default())?;
    assert!(result.answer.spans.is_empty());
    assert_eq!(result.answer.strategy, None);
    assert!(!result.plan.has_highlights());
    assert_eq!(result.plan.plain_text(), text);

    let result = highlighter.highlight("", &tokenize("fee")?, &tokenize("fee")?)?;
    assert!(result.plan.segments().is_empty());
    Ok(())
}

#[test]
fn test_answer_wins_over_missing() -> Result<()> {
    let highlighter = Highlighter::new(LocatorConfig::default());

    let result = highlighter.highlight("The fund grows", &tokenize("fund")?, &tokenize("fund")?)?;

    assert_eq!(result.missing.spans.len(), 1);
    assert_eq!(highlighted(&result, HighlightColor::AnswerMatch), vec!["fund"]);
    assert!(highlighted(&result, HighlightColor::MissingMatch).is_empty());

    let texts: Vec<&str> = result.plan.segments().iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["The ", "fund", " grows"]);
    Ok(())
}

#[test]
fn test_segments_never_overlap() -> Result<()> {
    let highlighter = Highlighter::new(LocatorConfig::default());
    let text = "Class A shares pay a management fee; Class C shares pay a higher fee.";

    let result = highlighter.highlight(
        text,
        &tokenize("class shares fee")?,
        &tokenize("management fee class c")?,
    )?;

    let mut cursor = 0;
    for segment in result.plan.segments() {
        assert_eq!(segment.start, cursor);
        assert!(segment.end > segment.start);
        assert_eq!(&text[segment.start..segment.end], segment.text);
        cursor = segment.end;
    }
    assert_eq!(cursor, text.len());
    Ok(())
}

#[test]
fn test_locating_is_deterministic() -> Result<()> {
    let locator = SpanLocator::new(LocatorConfig::default());
    let text = "b a c a b c a b";
    let tokens = TokenSet::new(["a", "b"]);

    let first = locator.locate(text, &tokens)?;
    let second = locator.locate(text, &tokens)?;
    assert_eq!(first, second);
    // Leftmost of the equally short windows.
    assert_eq!(first.spans.as_slice(), &[Span::new(6, 9)]);
    Ok(())
}

#[test]
fn test_windows_are_measured_in_characters() -> Result<()> {
    let locator = SpanLocator::new(LocatorConfig::default());
    let tokens = TokenSet::new(["a", "b"]);

    let text = "a ééé b then a xxxx b";
    let located = locator.locate(text, &tokens)?;
    assert_eq!(located.strategy, Some(MatchStrategy::Ordered));
    assert_eq!(&text[located.spans.as_slice()[0].as_range()], "a ééé b");

    let text = "b ééé a then a xxxx b";
    let located = locator.locate(text, &tokens)?;
    assert_eq!(located.strategy, Some(MatchStrategy::Ordered));
    assert_eq!(&text[located.spans.as_slice()[0].as_range()], "a xxxx b");

    let located = locator.locate(text, &TokenSet::new(["b", "a"]))?;
    assert_eq!(located.strategy, Some(MatchStrategy::Ordered));
    assert_eq!(&text[located.spans.as_slice()[0].as_range()], "b ééé a");
    Ok(())
}

#[test]
fn test_markdown_escapes_outside_and_inside_highlights() -> Result<()> {
    let highlighter = Highlighter::new(LocatorConfig::default());
    let formatter = MarkdownFormatter::new(HighlightConfig::default());

    let result = highlighter.highlight("Pay $100 now", &tokenize("100")?, &TokenSet::default())?;
    assert_eq!(
        formatter.format(&result.plan),
        "Pay \\$<span style=\"background-color:#90EE90;\">100</span> now"
    );

    let result = highlighter.highlight(
        "Class A + shares",
        &tokenize("class a shares")?,
        &TokenSet::default(),
    )?;
    assert_eq!(
        formatter.format(&result.plan),
        "<span style=\"background-color:#90EE90;\">Class A \\+ shares</span>"
    );
    Ok(())
}

#[test]
fn test_html_rendering_uses_classes() -> Result<()> {
    let highlighter = Highlighter::new(LocatorConfig::default());
    let formatter = HtmlFormatter::new(HighlightConfig::default());

    let result = highlighter.highlight(
        "Fee <1%> for Class A",
        &tokenize("fee")?,
        &tokenize("class a")?,
    )?;
    assert_eq!(
        formatter.format(&result.plan),
        "<mark class=\"answer-match\">Fee</mark> &lt;1%&gt; for <mark class=\"missing-match\">Class A</mark>"
    );
    Ok(())
}
