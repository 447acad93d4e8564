//! Template Service - template management operations.
//!
//! Loads template files into a store and looks them up by name.
//! Separated from PromptEngine for single responsibility.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{TemplateLoader, TemplateStore},
    domain::PromptTemplate,
    error::{PromptError, PromptResult},
};

/// Service for template operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
    loader: Box<dyn TemplateLoader>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Box<dyn TemplateStore>, loader: Box<dyn TemplateLoader>) -> Self {
        Self { store, loader }
    }

    /// Load one file and store it, replacing any template with the same name.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_file(&self, path: &Path) -> PromptResult<PromptTemplate> {
        let template = self.loader.load_file(path)?;
        self.store.insert(template.clone())?;
        debug!(name = template.name(), "template loaded");
        Ok(template)
    }

    /// Load every template file in `dir` and store them.
    ///
    /// Returns the names loaded, in load order. On a name collision the
    /// template loaded last wins.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_directory(&self, dir: &Path) -> PromptResult<Vec<String>> {
        let templates = self.loader.load_directory(dir)?;
        let mut names = Vec::with_capacity(templates.len());

        for template in templates {
            names.push(template.name().to_string());
            self.store.insert(template)?;
        }

        info!(count = names.len(), "templates loaded from directory");
        Ok(names)
    }

    /// Get a template by name.
    pub fn get(&self, name: &str) -> PromptResult<PromptTemplate> {
        self.store.get(name)
    }

    /// Like [`get`](Self::get) but a missing template is `None`.
    pub fn find(&self, name: &str) -> PromptResult<Option<PromptTemplate>> {
        match self.store.get(name) {
            Ok(template) => Ok(Some(template)),
            Err(PromptError::TemplateNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Sorted template names.
    pub fn list_names(&self) -> PromptResult<Vec<String>> {
        let mut names: Vec<String> = self
            .store
            .list()?
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    /// List all templates.
    pub fn list(&self) -> PromptResult<Vec<PromptTemplate>> {
        self.store.list()
    }

    /// Add or update a template.
    pub fn save(&self, template: PromptTemplate) -> PromptResult<()> {
        self.store.insert(template)
    }

    /// Remove a template.
    pub fn remove(&self, name: &str) -> PromptResult<()> {
        self.store.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::LoaderError;
    use mockall::mock;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore(Mutex<BTreeMap<String, PromptTemplate>>);

    impl TemplateStore for MapStore {
        fn get(&self, name: &str) -> PromptResult<PromptTemplate> {
            self.0
                .lock()
                .unwrap()
                .get(name)
                .cloned()
                .ok_or_else(|| PromptError::TemplateNotFound { name: name.into() })
        }

        fn list(&self) -> PromptResult<Vec<PromptTemplate>> {
            Ok(self.0.lock().unwrap().values().cloned().collect())
        }

        fn insert(&self, template: PromptTemplate) -> PromptResult<()> {
            self.0
                .lock()
                .unwrap()
                .insert(template.name().to_string(), template);
            Ok(())
        }

        fn remove(&self, name: &str) -> PromptResult<()> {
            self.0
                .lock()
                .unwrap()
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| PromptError::TemplateNotFound { name: name.into() })
        }

        fn clear(&self) -> PromptResult<()> {
            self.0.lock().unwrap().clear();
            Ok(())
        }
    }

    mock! {
        Loader {}
        impl TemplateLoader for Loader {
            fn load_file(&self, path: &Path) -> Result<PromptTemplate, LoaderError>;
            fn load_directory(&self, dir: &Path) -> Result<Vec<PromptTemplate>, LoaderError>;
        }
    }

    fn template(name: &str, body: &str) -> PromptTemplate {
        PromptTemplate::new(name, "test", body, Vec::<String>::new()).unwrap()
    }

    fn service(loader: MockLoader) -> TemplateService {
        TemplateService::new(Box::<MapStore>::default(), Box::new(loader))
    }

    #[test]
    fn load_file_stores_template() {
        let mut loader = MockLoader::new();
        loader
            .expect_load_file()
            .returning(|_| Ok(template("qa", "Q")));
        let service = service(loader);

        let loaded = service.load_file(Path::new("qa.yaml")).unwrap();

        assert_eq!(loaded.name(), "qa");
        assert_eq!(service.get("qa").unwrap(), loaded);
    }

    #[test]
    fn load_file_propagates_loader_errors() {
        let mut loader = MockLoader::new();
        loader.expect_load_file().returning(|p| {
            Err(LoaderError::NotFound {
                path: p.to_path_buf(),
            })
        });
        let service = service(loader);

        let err = service.load_file(Path::new("gone.yaml")).unwrap_err();

        assert_eq!(
            err,
            PromptError::Loader(LoaderError::NotFound {
                path: PathBuf::from("gone.yaml")
            })
        );
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn load_directory_last_loaded_wins() {
        let mut loader = MockLoader::new();
        loader.expect_load_directory().returning(|_| {
            Ok(vec![
                template("dup", "first"),
                template("other", "x"),
                template("dup", "second"),
            ])
        });
        let service = service(loader);

        let names = service.load_directory(Path::new("prompts")).unwrap();

        assert_eq!(names, vec!["dup", "other", "dup"]);
        assert_eq!(service.list().unwrap().len(), 2);
        assert_eq!(service.get("dup").unwrap().body(), "second");
    }

    #[test]
    fn find_returns_none_for_unknown() {
        let service = service(MockLoader::new());
        assert!(service.find("nope").unwrap().is_none());
        assert!(matches!(
            service.get("nope"),
            Err(PromptError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn save_list_and_remove() {
        let service = service(MockLoader::new());
        service.save(template("b", "B")).unwrap();
        service.save(template("a", "A")).unwrap();

        assert_eq!(service.list_names().unwrap(), vec!["a", "b"]);
        assert_eq!(service.list().unwrap().len(), 2);

        service.remove("a").unwrap();
        assert_eq!(service.list_names().unwrap(), vec!["b"]);
        assert!(service.remove("a").is_err());
    }
}
