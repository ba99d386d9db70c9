use super::FontDescriptor;

/// Optional constraints on what a generated sample may contain.
///
/// An absent field places no constraint. A present but empty list is treated
/// the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationFilters {
    pub scripts: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub weights: Option<Vec<u16>>,
    pub categories: Option<Vec<String>>,
    pub styles: Option<Vec<String>>,
}

impl GenerationFilters {
    pub fn with_scripts<I, S>(scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scripts: Some(scripts.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn requested_scripts(&self) -> Option<&[String]> {
        non_empty(&self.scripts)
    }

    pub fn allows_language(&self, language: &str) -> bool {
        non_empty(&self.languages).map_or(true, |langs| langs.iter().any(|l| l == language))
    }

    pub fn allows_font(&self, font: &FontDescriptor) -> bool {
        let weight_ok =
            non_empty(&self.weights).map_or(true, |weights| weights.contains(&font.weight));
        let category_ok = non_empty(&self.categories).map_or(true, |categories| {
            categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&font.category))
        });
        let style_ok = non_empty(&self.styles)
            .map_or(true, |styles| styles.iter().any(|s| s.eq_ignore_ascii_case(&font.style)));

        weight_ok && category_ok && style_ok
    }
}

fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|l| !l.is_empty())
}
