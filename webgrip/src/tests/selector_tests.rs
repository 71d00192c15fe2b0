use crate::errors::ElementError;
use crate::selector::Selector;
use crate::utils::xpath_literal;

#[test]
fn parses_prefixed_selector_strings() {
    assert_eq!(Selector::from("css:div.card"), Selector::css("div.card"));
    assert_eq!(Selector::from("xpath://div[@id='x']"), Selector::xpath("//div[@id='x']"));
    assert_eq!(Selector::from("id:main"), Selector::id("main"));
    assert_eq!(Selector::from("name:email"), Selector::name("email"));
    assert_eq!(Selector::from("tag:select"), Selector::tag("select"));
    assert_eq!(Selector::from("class:wide"), Selector::ClassName("wide".to_string()));
    assert_eq!(Selector::from("link:Sign in"), Selector::link_text("Sign in"));
}

#[test]
fn unprefixed_strings_are_css() {
    assert_eq!(Selector::from("div.card"), Selector::css("div.card"));
    // A colon inside a CSS selector is not a type prefix.
    assert_eq!(Selector::from("div:hover"), Selector::css("div:hover"));
}

#[test]
fn strategy_lowers_to_w3c_pairs() {
    assert_eq!(
        Selector::css("div.card").strategy(),
        ("css selector", "div.card".to_string())
    );
    assert_eq!(
        Selector::xpath("//div").strategy(),
        ("xpath", "//div".to_string())
    );
    assert_eq!(
        Selector::id("main").strategy(),
        ("css selector", "[id=\"main\"]".to_string())
    );
    assert_eq!(
        Selector::name("email").strategy(),
        ("css selector", "[name=\"email\"]".to_string())
    );
    assert_eq!(
        Selector::tag("select").strategy(),
        ("tag name", "select".to_string())
    );
    assert_eq!(
        Selector::link_text("Sign in").strategy(),
        ("link text", "Sign in".to_string())
    );
}

#[test]
fn to_xpath_produces_node_tests() {
    assert_eq!(Selector::tag("form").to_xpath().unwrap(), "form");
    assert_eq!(Selector::id("main").to_xpath().unwrap(), "*[@id='main']");
    assert_eq!(
        Selector::name("email").to_xpath().unwrap(),
        "*[@name='email']"
    );
    assert_eq!(
        Selector::ClassName("wide".to_string()).to_xpath().unwrap(),
        "*[contains(concat(' ', normalize-space(@class), ' '), ' wide ')]"
    );
    assert_eq!(
        Selector::link_text("Sign in").to_xpath().unwrap(),
        "a[string()='Sign in']"
    );
    assert_eq!(
        Selector::xpath("div[@data-role]").to_xpath().unwrap(),
        "div[@data-role]"
    );
}

#[test]
fn css_has_no_xpath_form() {
    let error = Selector::css("div.card").to_xpath().unwrap_err();
    assert!(matches!(error, ElementError::InvalidArgument(_)));
}

#[test]
fn xpath_literal_handles_embedded_quotes() {
    assert_eq!(xpath_literal("plain"), "'plain'");
    assert_eq!(xpath_literal("it's"), "\"it's\"");
    assert_eq!(
        xpath_literal("both ' and \""),
        "concat('both ', \"'\", ' and \"')"
    );
}

#[test]
fn display_round_trips_through_parsing() {
    let selector = Selector::id("main");
    assert_eq!(Selector::from(selector.to_string().as_str()), selector);
}
