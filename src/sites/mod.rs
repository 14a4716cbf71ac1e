//! 站点注册表
//!
//! 按标识构造站点适配器。宿主据此把多个源聚合到同一接口后面，
//! 本 crate 当前只注册 MangaKatana 一个源。

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::config::SourceConfig;
use crate::interfaces::Source;
use crate::network::client::SiteClient;

pub mod mangakatana;

pub use mangakatana::MangaKatana;

type SourceFactory = Box<dyn Fn(SourceConfig, SiteClient) -> Arc<dyn Source> + Send + Sync>;

pub struct SourceRegistry {
    factories: HashMap<String, SourceFactory>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("mangakatana", |config, client| {
            Arc::new(MangaKatana::new(config, client))
        });
        registry
    }

    pub fn register<F>(&mut self, id: &str, factory: F)
    where
        F: Fn(SourceConfig, SiteClient) -> Arc<dyn Source> + Send + Sync + 'static,
    {
        self.factories.insert(id.to_string(), Box::new(factory));
    }

    pub fn create(
        &self,
        id: &str,
        config: SourceConfig,
        client: SiteClient,
    ) -> Option<Arc<dyn Source>> {
        self.factories.get(id).map(|f| f(config, client))
    }

    pub fn list(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
