//! Server-rendered HTML pages.
//!
//! Every page is a plain function of its inputs. The owner, the drained flash
//! queue and the login state arrive through [`PageContext`]; nothing is read
//! from global state. All interpolated values are escaped.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::db::User;
use crate::domain::validation::{NAME_MAX_CHARS, TITLE_MAX_CHARS, YEAR_MAX_CHARS};
use crate::models::movie::Movie;

/// Render-time context shared by every page.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub owner: Option<User>,
    pub flashes: Vec<String>,
    pub authenticated: bool,
}

fn layout(ctx: &PageContext, title: &str, content: &str) -> String {
    let heading = ctx.owner.as_ref().map_or_else(
        || "Watchlist".to_string(),
        |owner| format!("{}'s Watchlist", encode_text(&owner.name)),
    );

    let nav = if ctx.authenticated {
        r#"<li><a href="/settings">Settings</a></li>
            <li><a href="/logout">Logout</a></li>"#
    } else {
        r#"<li><a href="/login">Login</a></li>"#
    };

    let mut flashes = String::new();
    for message in &ctx.flashes {
        let _ = write!(flashes, r#"<div class="alert">{}</div>"#, encode_text(message));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/style.css" type="text/css">
</head>
<body>
    <h2>{heading}</h2>
    <nav>
        <ul>
            <li><a href="/">Home</a></li>
            {nav}
        </ul>
    </nav>
    {flashes}
    {content}
    <footer>
        <small>watchlist</small>
    </footer>
</body>
</html>
"#,
        title = encode_text(title),
    )
}

#[must_use]
pub fn index_page(ctx: &PageContext, movies: &[Movie]) -> String {
    let mut content = format!("<p>{} Titles</p>", movies.len());

    if ctx.authenticated {
        let _ = write!(
            content,
            r#"
    <form method="post" action="/">
        Name <input type="text" name="title" autocomplete="off" maxlength="{TITLE_MAX_CHARS}" required>
        Year <input type="text" name="year" autocomplete="off" maxlength="{YEAR_MAX_CHARS}" required>
        <input class="btn" type="submit" name="submit" value="Add">
    </form>"#
        );
    }

    content.push_str(r#"
    <ul class="movie-list">"#);
    for movie in movies {
        let imdb = format!(
            "https://www.imdb.com/find?q={}",
            urlencoding::encode(&movie.title)
        );

        let controls = if ctx.authenticated {
            format!(
                r#"
                <a class="btn" href="/movie/edit/{id}">Edit</a>
                <form class="inline-form" method="post" action="/movie/delete/{id}">
                    <input class="btn" type="submit" name="delete" value="Delete">
                </form>"#,
                id = movie.id
            )
        } else {
            String::new()
        };

        let _ = write!(
            content,
            r#"
        <li>{title} - {year}
            <span class="float-right">{controls}
                <a class="imdb" href="{imdb}" target="_blank" rel="noopener" title="Find this movie on IMDb">IMDb</a>
            </span>
        </li>"#,
            title = encode_text(&movie.title),
            year = encode_text(&movie.year),
            imdb = encode_double_quoted_attribute(&imdb),
        );
    }
    content.push_str("\n    </ul>");

    layout(ctx, "Watchlist", &content)
}

#[must_use]
pub fn edit_page(ctx: &PageContext, movie: &Movie) -> String {
    let content = format!(
        r#"<h3>Edit item</h3>
    <form method="post" action="/movie/edit/{id}">
        Name <input type="text" name="title" autocomplete="off" maxlength="{TITLE_MAX_CHARS}" required value="{title}">
        Year <input type="text" name="year" autocomplete="off" maxlength="{YEAR_MAX_CHARS}" required value="{year}">
        <input class="btn" type="submit" name="submit" value="Update">
    </form>"#,
        id = movie.id,
        title = encode_double_quoted_attribute(&movie.title),
        year = encode_double_quoted_attribute(&movie.year),
    );

    layout(ctx, "Edit item", &content)
}

#[must_use]
pub fn settings_page(ctx: &PageContext) -> String {
    let name = ctx.owner.as_ref().map_or("", |owner| owner.name.as_str());

    let content = format!(
        r#"<h3>Settings</h3>
    <form method="post" action="/settings">
        Your Name <input type="text" name="name" autocomplete="off" maxlength="{NAME_MAX_CHARS}" required value="{name}">
        <input class="btn" type="submit" name="submit" value="Save">
    </form>"#,
        name = encode_double_quoted_attribute(name),
    );

    layout(ctx, "Settings", &content)
}

#[must_use]
pub fn login_page(ctx: &PageContext) -> String {
    let content = r#"<h3>Login</h3>
    <form method="post" action="/login">
        Username<br>
        <input type="text" name="username" required><br><br>
        Password<br>
        <input type="password" name="password" required><br><br>
        <input class="btn" type="submit" name="submit" value="Submit">
    </form>"#;

    layout(ctx, "Login", content)
}

#[must_use]
pub fn not_found_page(ctx: &PageContext) -> String {
    let content = r#"<ul class="movie-list">
        <li>
            Page Not Found - 404
            <span class="float-right">
                <a href="/">Go Back</a>
            </span>
        </li>
    </ul>"#;

    layout(ctx, "404 Not Found", content)
}

#[must_use]
pub fn error_page() -> String {
    let content = r#"<ul class="movie-list">
        <li>
            Something went wrong - 500
            <span class="float-right">
                <a href="/">Go Back</a>
            </span>
        </li>
    </ul>"#;

    layout(&PageContext::default(), "500 Internal Server Error", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MovieId, UserId};

    fn owner(name: &str) -> User {
        User {
            id: UserId::OWNER,
            name: name.to_string(),
            username: Some("admin".to_string()),
        }
    }

    fn movie(id: i32, title: &str, year: &str) -> Movie {
        Movie {
            id: MovieId::new(id),
            title: title.to_string(),
            year: year.to_string(),
        }
    }

    #[test]
    fn index_lists_movies_with_count() {
        let ctx = PageContext {
            owner: Some(owner("Jesse")),
            ..PageContext::default()
        };
        let html = index_page(
            &ctx,
            &[movie(1, "My Neighbor Totoro", "1988"), movie(2, "Leon", "1994")],
        );

        assert!(html.contains("Jesse's Watchlist"));
        assert!(html.contains("<p>2 Titles</p>"));
        assert!(html.contains("My Neighbor Totoro - 1988"));
        assert!(html.contains("https://www.imdb.com/find?q=My%20Neighbor%20Totoro"));
    }

    #[test]
    fn controls_only_when_authenticated() {
        let movies = [movie(3, "WALL-E", "2008")];

        let anonymous = index_page(&PageContext::default(), &movies);
        assert!(!anonymous.contains("/movie/edit/3"));
        assert!(!anonymous.contains(r#"action="/""#));
        assert!(anonymous.contains(r#"href="/login""#));

        let ctx = PageContext {
            authenticated: true,
            ..PageContext::default()
        };
        let logged_in = index_page(&ctx, &movies);
        assert!(logged_in.contains("/movie/edit/3"));
        assert!(logged_in.contains("/movie/delete/3"));
        assert!(logged_in.contains(r#"href="/logout""#));
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let ctx = PageContext {
            owner: Some(owner("<b>x</b>")),
            flashes: vec!["<script>alert(1)</script>".to_string()],
            authenticated: true,
        };
        let evil = movie(1, r#""><script>alert(1)</script>"#, "<i>");

        let html = index_page(&ctx, std::slice::from_ref(&evil));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));

        let html = edit_page(&ctx, &evil);
        assert!(!html.contains("<script>"));
        assert!(!html.contains(r#"value=""><"#));
    }

    #[test]
    fn flashes_render_in_order() {
        let ctx = PageContext {
            flashes: vec!["Item created.".to_string(), "Goodbye.".to_string()],
            ..PageContext::default()
        };
        let html = login_page(&ctx);

        let first = html.find("Item created.").unwrap();
        let second = html.find("Goodbye.").unwrap();
        assert!(first < second);
    }

    #[test]
    fn edit_and_settings_prefill_values() {
        let ctx = PageContext {
            owner: Some(owner("Jesse")),
            authenticated: true,
            ..PageContext::default()
        };

        let html = edit_page(&ctx, &movie(4, "Leon", "1994"));
        assert!(html.contains(r#"action="/movie/edit/4""#));
        assert!(html.contains(r#"value="Leon""#));
        assert!(html.contains(r#"value="1994""#));

        let html = settings_page(&ctx);
        assert!(html.contains(r#"value="Jesse""#));
    }

    #[test]
    fn missing_owner_renders_generic_heading() {
        let html = not_found_page(&PageContext::default());
        assert!(html.contains("<h2>Watchlist</h2>"));
        assert!(html.contains("Page Not Found - 404"));
    }
}
