//! Walk a staged signup form through the page-object API.
//!
//! Runs against the scriptable mock session, so it needs no browser.

use std::sync::Arc;

use anyhow::Result;
use webgrip::{
    ElementConfig, ElementKind, MockElement, MockSession, Page, RemoteSession, Selector,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let session = Arc::new(MockSession::new());
    session.insert("form-1", MockElement::new("form"));
    session.insert(
        "name-1",
        MockElement::new("input").with_attribute("type", "text"),
    );
    session.insert(
        "accept-1",
        MockElement::new("input").with_attribute("type", "checkbox"),
    );
    session.insert("plan-1", MockElement::new("select"));
    session.insert("opt-1", MockElement::new("option").with_text("Starter"));
    session.insert("opt-2", MockElement::new("option").with_text("Team"));
    session.set_match("id:signup", &["form-1"]);
    session.set_match("name:fullname", &["name-1"]);
    session.set_match("css:input.accept", &["accept-1"]);
    session.set_match("tag:select", &["plan-1"]);
    session.set_match(Selector::tag("option"), &["opt-1", "opt-2"]);
    session.set_match(Selector::xpath(".//option[text()='Team']"), &["opt-2"]);

    let page = Page::new(session.clone() as Arc<dyn RemoteSession>);
    let form = page.query("id:signup").one().await?;

    let name = form.query("name:fullname").one().await?;
    let name = name.cast(ElementKind::TextBox, ElementConfig::default()).await?;
    let name = name.as_text_box().expect("cast to text box");
    name.fill("Ada Lovelace").await?;
    println!("name field value: {}", name.value().await?);

    let accept = form.query("css:input.accept").one().await?;
    accept.highlight().await?;
    let accept = accept.cast(ElementKind::Checkbox, ElementConfig::default()).await?;
    let accept = accept.as_checkbox().expect("cast to checkbox");
    accept.check().await?;
    println!("terms accepted: {}", accept.is_checked().await?);

    let plan = form.query("tag:select").one().await?;
    plan.fire_event("change").await?;
    let plan = plan.cast(ElementKind::Dropdown, ElementConfig::default()).await?;
    let plan = plan.as_dropdown().expect("cast to dropdown");
    println!("available plans: {:?}", plan.options().await?);
    plan.select("Team").await?;
    println!("selected plan: {:?}", plan.selected_option().await?);

    println!(
        "scripts executed against the page: {}",
        session.executed_scripts().len()
    );
    Ok(())
}
