//! Table-of-contents extraction from Markdown/MDX bodies.
//!
//! Only ATX headings (`## Heading`) at the start of a line are recognized;
//! level 1 is reserved for the page title and never included. Anchor ids
//! follow the usual heading-slug convention so they line up with the ids a
//! renderer assigns.

use serde::Serialize;

/// Default deepest heading level included (`###`).
pub const DEFAULT_MAX_LEVEL: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    pub id: String,
    pub text: String,
    pub level: usize,
}

/// A heading plus the headings nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocNode {
    #[serde(flatten)]
    pub item: TocItem,
    pub children: Vec<TocNode>,
}

/// Extract headings of level 2 through `max_level` in document order.
pub fn extract_toc(body: &str, max_level: usize) -> Vec<TocItem> {
    body.lines()
        .filter_map(parse_heading)
        .filter(|(level, _)| *level <= max_level)
        .map(|(level, text)| TocItem {
            id: heading_id(&text),
            text,
            level,
        })
        .collect()
}

fn parse_heading(line: &str) -> Option<(usize, String)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(2..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some((level, text.to_string()))
}

/// Convert heading text into an anchor id.
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// hyphens, turns whitespace runs into a hyphen, collapses hyphen runs, and
/// trims hyphens from both ends.
pub fn heading_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.to_lowercase().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            continue;
        }
        if pending_space {
            id.push('-');
            pending_space = false;
        }
        id.push(c);
    }
    if pending_space {
        id.push('-');
    }

    let mut collapsed = String::with_capacity(id.len());
    for c in id.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed.trim_matches('-').to_string()
}

/// Nest a flat heading list: each heading becomes a child of the nearest
/// preceding heading with a lower level.
pub fn nest_toc(items: &[TocItem]) -> Vec<TocNode> {
    // Path of indices from the root list down to the current open heading.
    let mut roots: Vec<TocNode> = Vec::new();
    let mut path: Vec<usize> = Vec::new();

    for item in items {
        while let Some(level) = level_at(&roots, &path) {
            if level >= item.level {
                path.pop();
            } else {
                break;
            }
        }

        let node = TocNode {
            item: item.clone(),
            children: Vec::new(),
        };
        let position = match children_at(&mut roots, &path) {
            Some(children) => {
                children.push(node);
                children.len() - 1
            }
            None => {
                roots.push(node);
                roots.len() - 1
            }
        };
        path.push(position);
    }

    roots
}

fn level_at(roots: &[TocNode], path: &[usize]) -> Option<usize> {
    let (first, rest) = path.split_first()?;
    let mut node = roots.get(*first)?;
    for idx in rest {
        node = node.children.get(*idx)?;
    }
    Some(node.item.level)
}

fn children_at<'a>(roots: &'a mut [TocNode], path: &[usize]) -> Option<&'a mut Vec<TocNode>> {
    let (first, rest) = path.split_first()?;
    let mut node = roots.get_mut(*first)?;
    for idx in rest {
        node = node.children.get_mut(*idx)?;
    }
    Some(&mut node.children)
}
