/// A path template split the way the REST conventions see it.
///
/// `/orders/{id}/items` becomes resource `orders` and remainder `{id}/items`.
/// Only the leading segment is ever interpreted; everything after the slashes that
/// follow it is kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParts<'a> {
    /// Leading run of word characters and hyphens, possibly empty
    pub resource: &'a str,
    /// Slashes between the resource and the remainder
    pub trailing_slashes: &'a str,
    /// Everything after the trailing slashes
    pub remainder: &'a str,
}

impl<'a> PathParts<'a> {
    /// Split a path template. Never fails; any input yields some split.
    #[must_use]
    pub fn parse(path: &'a str) -> Self {
        let rest = path.strip_prefix('/').unwrap_or(path);

        let resource_end = rest
            .char_indices()
            .find(|(_, c)| !is_resource_char(*c))
            .map_or(rest.len(), |(idx, _)| idx);
        let (resource, rest) = rest.split_at(resource_end);

        let slashes_end = rest.len() - rest.trim_start_matches('/').len();
        let (trailing_slashes, remainder) = rest.split_at(slashes_end);

        PathParts {
            resource,
            trailing_slashes,
            remainder,
        }
    }

    /// True for a bare resource path such as `/orders` or `/orders/`
    #[must_use]
    pub fn is_collection(&self) -> bool {
        !self.resource.is_empty() && self.remainder.is_empty()
    }

    /// Resource name as a namespace segment (`order-items` -> `order_items`)
    #[must_use]
    pub fn namespace_segment(&self) -> String {
        self.resource.replace('-', "_")
    }
}

fn is_resource_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
