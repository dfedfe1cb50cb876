use v_htmlescape::escape;

use crate::app::contact::{ContactSubmission, FieldError, Receipt, OTHER_SERVICE, TIMEFRAMES};
use crate::content::locations::city_slug;
use crate::core::site::{CityLink, Page, PageBody, PageMeta};
use crate::domain::model::{
    Business, Faq, Location, PricingCategory, ProseSection, Region, Review, ServicePage,
    ServiceSummary,
};
use serde_json::Value;

const STYLESHEET: &str = r#"
        body { margin: 0; font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; color: #1f2a1f; line-height: 1.6; }
        header, footer { background: #1f2a1f; color: #f4f1ea; padding: 1rem 4vw; }
        header nav a, footer a { color: #f4f1ea; margin-right: 1.25rem; text-decoration: none; }
        main { width: min(1080px, 92vw); margin: 2rem auto; }
        .hero { padding: 2rem 0; }
        .btn { display: inline-block; background: #5a7f2b; color: #fff; padding: 0.7rem 1.4rem; border-radius: 6px; text-decoration: none; }
        .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1.25rem; }
        .card { border: 1px solid #d9d4c7; border-radius: 10px; padding: 1rem; }
        .card img { width: 100%; border-radius: 6px; }
        .error { color: #b42318; font-size: 0.9rem; }
        form label { display: block; margin-top: 0.9rem; font-weight: 600; }
        form input, form select, form textarea { width: 100%; padding: 0.6rem; border: 1px solid #d9d4c7; border-radius: 6px; }
        details { border-bottom: 1px solid #d9d4c7; padding: 0.6rem 0; }
"#;

/// Embeds a JSON-LD object. `</` is escaped so content cannot close the tag.
fn json_ld(value: &Value) -> String {
    format!(
        r#"<script type="application/ld+json">{}</script>"#,
        value.to_string().replace("</", "<\\/")
    )
}

fn layout(meta: &PageMeta, business: &Business, structured_data: &[Value], main: &str) -> String {
    let schemas: String = structured_data.iter().map(json_ld).collect();
    let social: String = business
        .social
        .urls()
        .into_iter()
        .map(|url| format!(r#"<a href="{url}" rel="noopener">{url}</a>"#, url = escape(url)))
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <meta property="og:site_name" content="{name}">
    <style>{style}</style>
    {schemas}
</head>
<body>
<header>
    <strong>{name}</strong> <span>{tagline}</span>
    <nav>
        <a href="/">Home</a><a href="/about">About</a><a href="/services">Services</a><a href="/services-pricing">Pricing</a><a href="/locations">Service Areas</a><a href="/contact">Contact</a>
        <a href="{phone_href}">{phone}</a>
    </nav>
</header>
<main>
{main}
</main>
<footer>
    <p><strong>{name}</strong> · {motto}</p>
    <p>{street}, {city}, {state} {zip} · <a href="{phone_href}">{phone}</a> · <a href="mailto:{email}">{email}</a></p>
    <p>Serving {area}{hours}</p>
    <p>{social}</p>
</footer>
</body>
</html>
"##,
        title = escape(&meta.title),
        description = escape(&meta.description),
        name = escape(&business.business_name),
        tagline = escape(&business.tagline),
        motto = escape(&business.motto),
        style = STYLESHEET,
        schemas = schemas,
        main = main,
        phone = escape(&business.phone),
        phone_href = escape(&business.phone_href),
        email = escape(&business.email),
        street = escape(&business.address.street),
        city = escape(&business.address.city),
        state = escape(&business.address.state),
        zip = escape(&business.address.zip),
        area = escape(&business.service_area_label),
        hours = business
            .business_hours
            .as_deref()
            .map(|h| format!(" · {}", escape(h)))
            .unwrap_or_default(),
        social = social,
    )
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let items: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<ul>{}</ul>", items)
}

fn paragraphs(items: &[String]) -> String {
    items
        .iter()
        .map(|p| format!("<p>{}</p>", escape(p)))
        .collect()
}

fn faq_section(heading: &str, faqs: &[Faq]) -> String {
    if faqs.is_empty() {
        return String::new();
    }
    let items: String = faqs
        .iter()
        .map(|faq| {
            format!(
                "<details><summary>{}</summary><p>{}</p></details>",
                escape(&faq.question),
                escape(&faq.answer)
            )
        })
        .collect();
    format!(r#"<section id="faqs"><h2>{}</h2>{}</section>"#, escape(heading), items)
}

fn reviews_section(reviews: &[Review], business: &Business) -> String {
    let items: String = reviews
        .iter()
        .map(|review| {
            let stars = "★".repeat(review.rating.min(5) as usize);
            let technician = if review.technician.is_empty() {
                String::new()
            } else {
                format!(" <small>{}</small>", escape(&review.technician))
            };
            format!(
                r#"<div class="card" data-review="{id}"><div>{stars}</div><p>{text}</p><p><strong>{name}</strong>{technician}</p></div>"#,
                id = review.id,
                stars = stars,
                text = escape(&review.text),
                name = escape(&review.name),
                technician = technician,
            )
        })
        .collect();
    format!(
        r#"<section id="reviews"><h2>What Our Clients Say</h2><p>{rating} average from {count} projects</p><div class="cards">{items}</div></section>"#,
        rating = escape(&business.average_rating),
        count = escape(&business.review_count),
        items = items,
    )
}

fn service_cards(services: &[ServiceSummary]) -> String {
    let cards: String = services
        .iter()
        .map(|service| {
            let image = service
                .image
                .as_deref()
                .map(|src| format!(r#"<img src="{}" alt="{}">"#, escape(src), escape(&service.name)))
                .unwrap_or_default();
            format!(
                r#"<a class="card" href="/services/{slug}" data-icon="{icon}">{image}<h3>{name}</h3><p>{short}</p></a>"#,
                slug = escape(&service.slug),
                icon = escape(&service.icon),
                image = image,
                name = escape(&service.name),
                short = escape(&service.short_description),
            )
        })
        .collect();
    format!(r#"<div class="cards">{}</div>"#, cards)
}

fn prose_section(id: &str, section: &ProseSection) -> String {
    format!(
        r#"<section id="{id}"><h2>{heading}</h2>{subheading}{body}{bullets}</section>"#,
        id = id,
        heading = escape(&section.heading),
        subheading = section
            .subheading
            .as_deref()
            .map(|s| format!("<h3>{}</h3>", escape(s)))
            .unwrap_or_default(),
        body = paragraphs(&section.body),
        bullets = bullet_list(&section.bullets),
    )
}

fn cta_block(business: &Business) -> String {
    format!(
        r#"<section class="hero"><h2>Ready to Transform Your Outdoor Space?</h2><a class="btn" href="/contact">Get a Consultation</a> or call <a href="{href}">{phone}</a></section>"#,
        href = escape(&business.phone_href),
        phone = escape(&business.phone),
    )
}

fn home_main(page: &Page, services: &[ServiceSummary], faqs: &[Faq]) -> String {
    let b = &page.business;
    format!(
        r#"<section class="hero"><h1>{motto}</h1><p>{tagline}</p><p>{years} years · {count} projects · {certs}</p><a class="btn" href="/contact">Get a Consultation</a></section>
<section id="services"><h2>Our Services</h2>{cards}</section>
{reviews}
{faqs}
{cta}"#,
        motto = escape(&b.motto),
        tagline = escape(&b.tagline),
        years = escape(&b.years_experience),
        count = escape(&b.review_count),
        certs = escape(&b.certifications.join(" · ")),
        cards = service_cards(services),
        reviews = reviews_section(&page.reviews, b),
        faqs = faq_section("Frequently Asked Questions", faqs),
        cta = cta_block(b),
    )
}

fn about_main(page: &Page, faqs: &[Faq]) -> String {
    let b = &page.business;
    format!(
        r#"<section class="hero"><h1>About {name}</h1><p>Founded in {founded} by {owner}, we have spent {years} years designing, building, and maintaining outdoor spaces across the Austin metro.</p>{certs}</section>
{reviews}
{faqs}
{cta}"#,
        name = escape(&b.business_name),
        founded = escape(&b.founded_year),
        owner = escape(&b.owner_name),
        years = escape(&b.years_experience),
        certs = bullet_list(&b.certifications),
        reviews = reviews_section(&page.reviews, b),
        faqs = faq_section("About Our Company", faqs),
        cta = cta_block(b),
    )
}

fn services_main(page: &Page, services: &[ServiceSummary]) -> String {
    format!(
        r#"<section class="hero"><h1>Our Services</h1><p>Design, build, and maintain: one licensed team from concept to care.</p></section>
{cards}
{reviews}
{cta}"#,
        cards = service_cards(services),
        reviews = reviews_section(&page.reviews, &page.business),
        cta = cta_block(&page.business),
    )
}

fn service_main(page: &Page, service: &ServicePage) -> String {
    let mut body = String::new();

    body.push_str(&paragraphs(&service.description));
    for section in &service.sections {
        let image = section
            .image
            .as_deref()
            .map(|src| format!(r#"<img src="{}" alt="{}">"#, escape(src), escape(&section.heading)))
            .unwrap_or_default();
        body.push_str(&format!(
            "<section><h2>{}</h2><p>{}</p>{}{}</section>",
            escape(&section.heading),
            escape(&section.body),
            bullet_list(&section.bullets),
            image
        ));
    }
    if !service.systems_list.is_empty() {
        body.push_str(&format!("<section><h2>Systems We Install</h2>{}</section>", bullet_list(&service.systems_list)));
    }
    if !service.advantages.is_empty() {
        body.push_str(&format!("<section><h2>Advantages</h2>{}</section>", bullet_list(&service.advantages)));
    }
    if !service.details.is_empty() {
        let details: String = service
            .details
            .iter()
            .map(|d| format!("<div class=\"card\"><h3>{}</h3><p>{}</p></div>", escape(&d.detail), escape(&d.description)))
            .collect();
        body.push_str(&format!(r#"<section><h2>What's Included</h2><div class="cards">{}</div></section>"#, details));
    }
    if !service.process_steps.is_empty() {
        let steps: String = service
            .process_steps
            .iter()
            .map(|s| format!("<li><strong>{}</strong> {}</li>", escape(&s.title), escape(&s.description)))
            .collect();
        body.push_str(&format!("<section><h2>Our Process</h2><ol>{}</ol></section>", steps));
    }
    if let Some(investment) = &service.investment_section {
        body.push_str(&format!(
            "<section><h2>{}</h2><p>{}</p>{}</section>",
            escape(&investment.heading),
            escape(&investment.body),
            bullet_list(&investment.bullets)
        ));
    }
    if !service.why_choose_bullets.is_empty() {
        body.push_str(&format!(
            "<section><h2>Why Choose {}</h2>{}</section>",
            escape(&page.business.business_name),
            bullet_list(&service.why_choose_bullets)
        ));
    }

    format!(
        r#"<nav class="crumbs"><a href="/">Home</a> / <a href="/services">Services</a> / <span>{name}</span></nav>
<section class="hero" style="background-image:url('{image}')"><h1>{headline}</h1><p>{subheadline}</p>{hero_body}<a class="btn" href="{cta_url}">{cta_label}</a> <a href="{phone_href}">{phone}</a></section>
{body}
{reviews}
{faqs}
{cta}"#,
        name = escape(&service.name),
        image = escape(&service.hero_image),
        headline = escape(&service.hero_headline),
        subheadline = escape(&service.hero_subheadline),
        hero_body = service
            .hero_body
            .as_deref()
            .map(|b| format!("<p>{}</p>", escape(b)))
            .unwrap_or_default(),
        cta_url = escape(&service.cta_url),
        cta_label = escape(&service.cta_label),
        phone_href = escape(&page.business.phone_href),
        phone = escape(&page.business.phone),
        body = body,
        reviews = reviews_section(&page.reviews, &page.business),
        faqs = faq_section(&format!("{} FAQs", service.name), &service.faqs),
        cta = cta_block(&page.business),
    )
}

fn pricing_main(page: &Page, pricing: &[PricingCategory], faqs: &[Faq]) -> String {
    let tables: String = pricing
        .iter()
        .map(|category| {
            let rows: String = category
                .services
                .iter()
                .map(|line| format!("<tr><td>{}</td><td>{}</td></tr>", escape(&line.name), escape(&line.price_range)))
                .collect();
            format!(
                "<section><h2>{}</h2><table><tbody>{}</tbody></table></section>",
                escape(&category.category),
                rows
            )
        })
        .collect();
    format!(
        r#"<section class="hero"><h1>Services &amp; Pricing</h1><p>Typical project ranges. Every proposal is itemized after an on-site consultation.</p></section>
{tables}
{reviews}
{faqs}
{cta}"#,
        tables = tables,
        reviews = reviews_section(&page.reviews, &page.business),
        faqs = faq_section("Pricing FAQs", faqs),
        cta = cta_block(&page.business),
    )
}

fn locations_main(page: &Page, regions: &[Region], cities: &[CityLink]) -> String {
    let city_cards: String = cities
        .iter()
        .map(|c| {
            format!(
                r#"<a class="card" href="/locations/{slug}"><h3>{city}</h3><p>{county} County</p></a>"#,
                slug = escape(&c.slug),
                city = escape(&c.city),
                county = escape(&c.county),
            )
        })
        .collect();
    let region_list: String = regions
        .iter()
        .map(|r| format!("<section><h3>{}</h3>{}</section>", escape(&r.name), bullet_list(&r.cities)))
        .collect();
    format!(
        r#"<section class="hero"><h1>Service Areas</h1><p>{area}</p></section>
<div class="cards">{cards}</div>
<section><h2>Regions We Serve</h2>{regions}</section>
{cta}"#,
        area = escape(&page.business.service_area_label),
        cards = city_cards,
        regions = region_list,
        cta = cta_block(&page.business),
    )
}

fn location_main(page: &Page, location: &Location) -> String {
    let residential: String = location
        .residential
        .services
        .iter()
        .map(|s| format!("<div class=\"card\"><h3>{}</h3><p>{}</p></div>", escape(&s.name), escape(&s.description)))
        .collect();
    let nearby: String = location
        .nearby_cities
        .iter()
        .map(|city| format!(r#"<a href="/locations/{}">{}</a> "#, escape(&city_slug(city)), escape(city)))
        .collect();

    format!(
        r#"<nav class="crumbs"><a href="/">Home</a> / <a href="/locations">Service Areas</a> / <span>{city}</span></nav>
<section class="hero"><h1>{headline}</h1><p>{description}</p><a class="btn" href="/contact">Get a Consultation</a></section>
{why}
<section id="residential"><h2>{res_heading}</h2><p>{res_body}</p><div class="cards">{residential}</div></section>
{expertise}
{equipment}
{protection}
<section id="commercial"><h2>Commercial Landscape Services in {city}</h2>{commercial}</section>
{faqs}
<section id="nearby"><h2>Nearby Service Areas</h2><p>{nearby}</p></section>
{reviews}
{cta}"#,
        city = escape(&location.city),
        headline = escape(&location.hero_headline),
        description = escape(&location.hero_description),
        why = prose_section("why-trust", &location.why_trust),
        res_heading = escape(&location.residential.heading),
        res_body = escape(&location.residential.body),
        residential = residential,
        expertise = prose_section("expertise", &location.expertise),
        equipment = prose_section("equipment", &location.equipment),
        protection = prose_section("protection", &location.protection),
        commercial = bullet_list(&location.commercial_services),
        faqs = faq_section(&format!("{} Landscaping FAQs", location.city), &location.faqs),
        nearby = nearby,
        reviews = reviews_section(&page.reviews, &page.business),
        cta = cta_block(&page.business),
    )
}

fn select_options(options: &[(String, String)], selected: &str, placeholder: &str) -> String {
    let mut html = format!(r#"<option value="">{}</option>"#, escape(placeholder));
    for (value, label) in options {
        html.push_str(&format!(
            r#"<option value="{value}"{sel}>{label}</option>"#,
            value = escape(value),
            sel = if value == selected { " selected" } else { "" },
            label = escape(label),
        ));
    }
    html
}

fn contact_form(services: &[ServiceSummary], form: &ContactSubmission, errors: &[FieldError]) -> String {
    let error_for = |field: &str| -> String {
        errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e.message)))
            .collect()
    };

    let mut service_options: Vec<(String, String)> = services
        .iter()
        .map(|s| (s.slug.clone(), s.name.clone()))
        .collect();
    service_options.push((OTHER_SERVICE.to_string(), "Other".to_string()));
    let timeframe_options: Vec<(String, String)> = TIMEFRAMES
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect();

    format!(
        r#"<form method="post" action="/contact">
<label for="name">Full Name *</label><input id="name" name="name" type="text" value="{name}" placeholder="Your name">{name_err}
<label for="email">Email *</label><input id="email" name="email" type="email" value="{email}" placeholder="you@example.com">{email_err}
<label for="phone">Phone *</label><input id="phone" name="phone" type="tel" value="{phone}" placeholder="(512) 555-0100">{phone_err}
<label for="zipCode">ZIP Code *</label><input id="zipCode" name="zipCode" type="text" value="{zip}" placeholder="78701">{zip_err}
<label for="service">Service Interested In</label><select id="service" name="service">{services}</select>{service_err}
<label for="timeframe">Timeframe</label><select id="timeframe" name="timeframe">{timeframes}</select>{timeframe_err}
<label for="message">Project Details *</label><textarea id="message" name="message" rows="5">{message}</textarea>{message_err}
<p><button class="btn" type="submit">Send Request</button></p>
</form>"#,
        name = escape(&form.name),
        name_err = error_for("name"),
        email = escape(&form.email),
        email_err = error_for("email"),
        phone = escape(&form.phone),
        phone_err = error_for("phone"),
        zip = escape(&form.zip_code),
        zip_err = error_for("zipCode"),
        services = select_options(&service_options, &form.service, "Select a service..."),
        service_err = error_for("service"),
        timeframes = select_options(&timeframe_options, &form.timeframe, "When do you need service?"),
        timeframe_err = error_for("timeframe"),
        message = escape(&form.message),
        message_err = error_for("message"),
    )
}

fn contact_main(page: &Page, form_html: &str) -> String {
    let b = &page.business;
    format!(
        r#"<section class="hero"><h1>Contact Us</h1><p>Fast response from licensed landscape professionals.</p></section>
<section id="request"><h2>Request a Consultation</h2>{form}</section>
<section id="details"><p>Call <a href="{href}">{phone}</a> · <a href="mailto:{email}">{email}</a></p><p>{street}, {city}, {state} {zip}</p></section>
{reviews}"#,
        form = form_html,
        href = escape(&b.phone_href),
        phone = escape(&b.phone),
        email = escape(&b.email),
        street = escape(&b.address.street),
        city = escape(&b.address.city),
        state = escape(&b.address.state),
        zip = escape(&b.address.zip),
        reviews = reviews_section(&page.reviews, b),
    )
}

pub fn render_page(page: &Page) -> String {
    let main = match &page.body {
        PageBody::Home { services, faqs } => home_main(page, services, faqs),
        PageBody::About { faqs } => about_main(page, faqs),
        PageBody::Contact { services } => contact_main(
            page,
            &contact_form(services, &ContactSubmission::default(), &[]),
        ),
        PageBody::Services { services } => services_main(page, services),
        PageBody::Service(service) => service_main(page, service),
        PageBody::Pricing { pricing, faqs } => pricing_main(page, pricing, faqs),
        PageBody::Locations { regions, cities } => locations_main(page, regions, cities),
        PageBody::Location(location) => location_main(page, location),
    };
    layout(&page.meta, &page.business, &page.structured_data, &main)
}

/// The contact page with the submitted values and their errors. `page` must
/// be the resolved contact page.
pub fn render_contact_errors(page: &Page, form: &ContactSubmission, errors: &[FieldError]) -> String {
    let services: &[ServiceSummary] = match &page.body {
        PageBody::Contact { services } => services,
        _ => &[],
    };
    let main = contact_main(page, &contact_form(services, form, errors));
    layout(&page.meta, &page.business, &page.structured_data, &main)
}

pub fn render_thank_you(page: &Page, receipt: &Receipt) -> String {
    let b = &page.business;
    let main = format!(
        r#"<section class="hero" id="thank-you"><h1>Thank You!</h1><p>Thanks, {name}. We have received your request and will get back to you within one business day. For immediate assistance, call us at <a href="{href}">{phone}</a>.</p><p><small>Received {received}</small></p></section>"#,
        name = escape(&receipt.name),
        href = escape(&b.phone_href),
        phone = escape(&b.phone),
        received = escape(&receipt.received_at.format("%Y-%m-%d %H:%M UTC").to_string()),
    );
    layout(&page.meta, b, &[], &main)
}

pub fn render_not_found(business: &Business) -> String {
    let meta = PageMeta {
        title: format!("Page Not Found | {}", business.business_name),
        description: "The page you are looking for does not exist.".to_string(),
    };
    let main = r#"<section class="hero"><h1>Page Not Found</h1><p>The page you are looking for does not exist or has moved.</p><a class="btn" href="/">Back to Home</a> <a href="/services">Browse Services</a></section>"#;
    layout(&meta, business, &[], main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticCatalog;
    use crate::core::{ContentSource, Site};
    use std::sync::Arc;

    fn site() -> Site {
        Site::new(
            ContentSource::disabled(),
            Arc::new(StaticCatalog::load().unwrap()),
            None,
        )
    }

    #[tokio::test]
    async fn test_service_page_html() {
        let page = site().resolve_path("/services/landscape-design").await.unwrap();
        let html = render_page(&page);

        assert!(html.contains("<h1>Landscape Design</h1>"));
        assert!(html.contains(r#"<script type="application/ld+json">"#));
        assert_eq!(html.matches("<details>").count(), 6);
        assert_eq!(html.matches("data-review=").count(), 12);
    }

    #[tokio::test]
    async fn test_contact_errors_are_rendered_and_values_kept() {
        let page = site().resolve_path("/contact").await.unwrap();
        let form = ContactSubmission {
            name: "<b>Dana</b>".to_string(),
            service: "hardscaping".to_string(),
            ..ContactSubmission::default()
        };
        let errors = form.field_errors(&site().catalog().service_slugs());
        let html = render_contact_errors(&page, &form, &errors);

        assert!(html.contains("Email is required"));
        assert!(html.contains("&lt;b&gt;Dana&lt;&#x2f;b&gt;"));
        assert!(!html.contains("<b>Dana</b>"));
        assert!(html.contains(r#"<option value="hardscaping" selected>"#));
    }

    #[test]
    fn test_json_ld_cannot_close_script() {
        let value = serde_json::json!({ "name": "</script><script>alert(1)" });
        let html = json_ld(&value);
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_not_found_page() {
        let catalog = StaticCatalog::load().unwrap();
        let html = render_not_found(&catalog.business);
        assert!(html.contains("Page Not Found | Outdoor Renovations"));
    }
}
