/// Comma-separated substring filter over note paths. Terms starting with `!`
/// exclude; the rest include.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl PathFilter {
    pub fn parse(spec: &str) -> Self {
        let mut filter = Self::default();
        for term in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match term.strip_prefix('!') {
                Some(rest) if !rest.is_empty() => filter.exclude.push(rest.to_string()),
                Some(_) => {}
                None => filter.include.push(term.to_string()),
            }
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn accepts(&self, path: &str) -> bool {
        if self.exclude.iter().any(|term| path.contains(term.as_str())) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|term| path.contains(term.as_str()))
    }
}
