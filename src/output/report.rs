use crate::paginator::PageLink;
use crate::session::{PageView, ProfileView, ResultCard};

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_tabs(view: &PageView) -> String {
    let mut out = String::new();
    for t in view.tabs.iter() {
        let class = if t.active { "tab active" } else { "tab" };
        out.push_str(&format!(
            "        <span class=\"{class}\">{}</span>\n",
            escape_html(&t.label)
        ));
    }
    out
}

fn render_card(card: &ResultCard) -> String {
    let r = &card.result;
    let date = r
        .date
        .as_deref()
        .map(|d| format!("<span class=\"date\">{} - </span>", escape_html(d)))
        .unwrap_or_default();
    format!(
        r#"      <div class="result" data-id="{id}" data-platform="{platform}">
        <div class="source">
          <img class="thumb" src="{thumb}" alt=""/>
          <div><div class="name">{name}</div><div class="url">{url}</div></div>
        </div>
        <a class="title" href="{url}">{title}</a>
        <p class="snippet">{date}{snippet}</p>
      </div>
"#,
        id = escape_html(&r.id),
        platform = escape_html(r.platform.label()),
        thumb = escape_html(&card.thumbnail_url),
        name = escape_html(&r.display_name),
        url = escape_html(&r.url),
        title = escape_html(&r.title),
        snippet = escape_html(&r.snippet),
    )
}

fn render_images(view: &PageView) -> String {
    if view.featured_images.is_empty() {
        return String::new();
    }
    let mut out = String::from("      <div class=\"images\">\n");
    for img in view.featured_images.iter() {
        out.push_str(&format!(
            "        <figure><img src=\"{}\" alt=\"{}\"/><figcaption>{}<br/><small>{}</small></figcaption></figure>\n",
            escape_html(&img.image_url),
            escape_html(&img.title),
            escape_html(&img.title),
            escape_html(&img.source)
        ));
    }
    out.push_str("      </div>\n");
    out
}

fn render_pagination(view: &PageView) -> String {
    if view.page_links.is_empty() {
        return String::new();
    }
    let mut out = String::from("      <nav class=\"pagination\">\n");
    if view.has_previous {
        out.push_str(&format!(
            "        <a class=\"nav\" data-page=\"{}\">&lsaquo; Previous</a>\n",
            view.current_page - 1
        ));
    }
    for link in view.page_links.iter() {
        match link {
            PageLink::Number(n) => {
                let class = if *n == view.current_page {
                    "page active"
                } else {
                    "page"
                };
                out.push_str(&format!(
                    "        <a class=\"{class}\" data-page=\"{n}\">{n}</a>\n"
                ));
            }
            PageLink::Ellipsis => out.push_str("        <span class=\"ellipsis\">...</span>\n"),
        }
    }
    if view.has_next {
        out.push_str(&format!(
            "        <a class=\"nav\" data-page=\"{}\">Next &rsaquo;</a>\n",
            view.current_page + 1
        ));
    }
    out.push_str("      </nav>\n");
    out
}

fn render_related(view: &PageView) -> String {
    if view.related_searches.is_empty() {
        return String::new();
    }
    let mut out = String::from(
        "      <div class=\"related\">\n        <h3>People also search for</h3>\n",
    );
    for q in view.related_searches.iter() {
        out.push_str(&format!(
            "        <span class=\"chip\">{}</span>\n",
            escape_html(q)
        ));
    }
    out.push_str("      </div>\n");
    out
}

fn render_profile(profile: &ProfileView) -> String {
    let r = &profile.result;
    format!(
        r#"  <div class="modal {platform}">
    <img class="header" src="{header}" alt=""/>
    <img class="avatar" src="{avatar}" alt=""/>
    <h2>{name}</h2>
    <p>{title}</p>
    <p class="location">{location}</p>
    <p>{snippet}</p>
  </div>
"#,
        platform = escape_html(&r.platform.label().to_lowercase()),
        header = escape_html(&profile.header_url),
        avatar = escape_html(&profile.avatar_url),
        name = escape_html(&r.display_name),
        title = escape_html(&r.title),
        location = escape_html(r.location.as_deref().unwrap_or_default()),
        snippet = escape_html(&r.snippet),
    )
}

pub fn render_html(view: &PageView) -> Vec<u8> {
    let body = if view.empty_dataset {
        format!(
            "      <h1>No results found</h1>\n      <p>{} results are not available.</p>\n",
            escape_html(&view.query)
        )
    } else {
        let mut body = format!(
            "      <div class=\"count\">About {} results</div>\n",
            view.total_results
        );
        if view.results.is_empty() {
            body.push_str(
                "      <p class=\"empty\">No results found. Try adjusting your search or filters.</p>\n",
            );
        }
        body.push_str(&render_images(view));
        for card in view.results.iter() {
            body.push_str(&render_card(card));
        }
        body.push_str(&render_pagination(view));
        body.push_str(&render_related(view));
        body
    };
    let profile = view.profile.as_ref().map(render_profile).unwrap_or_default();

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{query} - Search</title>
  <style>
    body {{ font-family: arial, sans-serif; margin: 0; background: #fff; color: #202124; }}
    header {{ padding: 20px 16px 0; border-bottom: 1px solid #ebebeb; }}
    .search {{ border: 1px solid #dfe1e5; border-radius: 24px; padding: 10px 20px; max-width: 640px; }}
    .tabs {{ display: flex; gap: 24px; padding: 12px 0; font-size: 14px; color: #5f6368; }}
    .tab.active {{ color: #1a0dab; border-bottom: 3px solid #1a0dab; }}
    main {{ max-width: 652px; padding: 0 16px 0 16px; margin-left: 160px; }}
    .count {{ color: #70757a; font-size: 14px; margin: 16px 0; }}
    .result {{ margin-bottom: 28px; }}
    .source {{ display: flex; gap: 12px; align-items: center; font-size: 14px; }}
    .thumb {{ width: 28px; height: 28px; border-radius: 50%; }}
    .url {{ color: #4d5156; font-size: 12px; }}
    .title {{ color: #1a0dab; font-size: 20px; text-decoration: none; }}
    .snippet {{ color: #4d5156; font-size: 14px; }}
    .date {{ color: #70757a; }}
    .images {{ display: flex; gap: 8px; margin-bottom: 24px; }}
    .images img {{ width: 160px; height: 160px; object-fit: cover; border-radius: 8px; }}
    .pagination {{ display: flex; gap: 4px; justify-content: center; border-top: 1px solid #ebebeb; padding: 20px 0; margin: 32px 0; }}
    .pagination a {{ min-width: 40px; padding: 8px; border: 1px solid #dadce0; border-radius: 4px; color: #1a0dab; text-align: center; }}
    .pagination a.active {{ background: #1a0dab; color: #fff; }}
    .ellipsis {{ padding: 0 8px; color: #70757a; }}
    .chip {{ display: inline-block; background: #f1f3f4; border-radius: 16px; padding: 8px 14px; margin: 4px; }}
    .modal {{ position: fixed; inset: 40px; background: #fff; box-shadow: 0 4px 24px rgba(0,0,0,.3); padding: 24px; overflow: auto; }}
    .modal .header {{ width: 100%; height: 160px; object-fit: cover; }}
    .modal .avatar {{ width: 120px; height: 120px; border-radius: 50%; margin-top: -60px; border: 4px solid #fff; }}
  </style>
</head>
<body>
  <header>
    <div class="search">{query}</div>
    <nav class="tabs">
{tabs}    </nav>
  </header>
  <main>
{body}  </main>
{profile}</body>
</html>
"####,
        query = escape_html(&view.query),
        tabs = render_tabs(view),
        body = body,
        profile = profile,
    );
    html.into_bytes()
}
