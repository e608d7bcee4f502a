//! Asynchronous model loading keyed by file format.
//!
//! The tree only needs a collaborator that turns `(type, url)` into an optional
//! scene; [`ModelLoader`] is the registry the editor hands out for that.

use std::fmt;
use std::str::FromStr;

use futures::future::{self, LocalBoxFuture};
use log::warn;
use rustc_hash::FxHashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::UnknownFormat;

/// Model file formats with a registered loader key.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    Amf,
    Awd,
    Babylon,
    Binary,
    Ctm,
    Dae,
    Fbx,
    Glb,
    Gltf,
    Kmz,
    Md2,
    Json,
    Obj,
    Ply,
    Stl,
    Vtk,
    Lol,
}

impl ModelFormat {
    pub const ALL: [Self; 17] = [
        Self::Amf,
        Self::Awd,
        Self::Babylon,
        Self::Binary,
        Self::Ctm,
        Self::Dae,
        Self::Fbx,
        Self::Glb,
        Self::Gltf,
        Self::Kmz,
        Self::Md2,
        Self::Json,
        Self::Obj,
        Self::Ply,
        Self::Stl,
        Self::Vtk,
        Self::Lol,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Amf => "amf",
            Self::Awd => "awd",
            Self::Babylon => "babylon",
            Self::Binary => "binary",
            Self::Ctm => "ctm",
            Self::Dae => "dae",
            Self::Fbx => "fbx",
            Self::Glb => "glb",
            Self::Gltf => "gltf",
            Self::Kmz => "kmz",
            Self::Md2 => "md2",
            Self::Json => "json",
            Self::Obj => "obj",
            Self::Ply => "ply",
            Self::Stl => "stl",
            Self::Vtk => "vtk",
            Self::Lol => "lol",
        }
    }

    /// Case-sensitive lookup of a loader key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.key() == key)
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModelFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownFormat(s.to_owned()))
    }
}

/// Options passed along with a load request.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Loader key, e.g. `"gltf"`.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: Option<String>,
    /// Format-specific settings forwarded untouched.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub extra: FxHashMap<String, String>,
}

impl LoadOptions {
    pub fn of_type(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            extra: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Loads one model format. `S` is whatever scene object the host produces.
pub trait FormatLoader<S> {
    /// Resolves to `None` when the resource could not be turned into a scene.
    fn load<'a>(&'a self, url: &'a str, options: &'a LoadOptions) -> LocalBoxFuture<'a, Option<S>>;
}

impl<S: 'static, F> FormatLoader<S> for F
where
    F: Fn(&str, &LoadOptions) -> Option<S>,
{
    fn load<'a>(&'a self, url: &'a str, options: &'a LoadOptions) -> LocalBoxFuture<'a, Option<S>> {
        Box::pin(future::ready(self(url, options)))
    }
}

/// Dispatches load requests to the loader registered for the request's type.
pub struct ModelLoader<S> {
    loaders: FxHashMap<String, Box<dyn FormatLoader<S>>>,
}

impl<S> Default for ModelLoader<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for ModelLoader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ModelLoader").field("keys", &keys).finish()
    }
}

impl<S> ModelLoader<S> {
    pub fn new() -> Self {
        Self {
            loaders: FxHashMap::default(),
        }
    }

    /// Registers a loader under an arbitrary key, replacing any previous one.
    pub fn register(&mut self, key: impl Into<String>, loader: impl FormatLoader<S> + 'static) {
        self.loaders.insert(key.into(), Box::new(loader));
    }

    pub fn register_format(&mut self, format: ModelFormat, loader: impl FormatLoader<S> + 'static) {
        self.register(format.key(), loader);
    }

    pub fn supports(&self, key: &str) -> bool {
        self.loaders.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Loads `url` with the loader named by `options.kind`.
    ///
    /// A missing type or an unregistered key logs a warning and yields `None`.
    pub async fn load(&self, url: &str, options: &LoadOptions) -> Option<S> {
        let Some(kind) = options.kind.as_deref() else {
            warn!("loader: type of {url} is not defined");
            return None;
        };
        let Some(loader) = self.loaders.get(kind) else {
            warn!("loader: no loader for type {kind}");
            return None;
        };
        loader.load(url, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[derive(Debug, PartialEq)]
    struct Scene {
        url: String,
        format: &'static str,
    }

    struct DelayedGltf;

    impl FormatLoader<Scene> for DelayedGltf {
        fn load<'a>(
            &'a self,
            url: &'a str,
            _options: &'a LoadOptions,
        ) -> LocalBoxFuture<'a, Option<Scene>> {
            Box::pin(async move {
                future::ready(()).await;
                Some(Scene {
                    url: url.to_owned(),
                    format: "gltf",
                })
            })
        }
    }

    fn loader() -> ModelLoader<Scene> {
        let mut loader = ModelLoader::new();
        loader.register_format(ModelFormat::Gltf, DelayedGltf);
        loader.register_format(ModelFormat::Obj, |url: &str, _: &LoadOptions| {
            (!url.is_empty()).then(|| Scene {
                url: url.to_owned(),
                format: "obj",
            })
        });
        loader
    }

    #[test]
    fn keys_round_trip_through_display() {
        for format in ModelFormat::ALL {
            assert_eq!(format.to_string().parse::<ModelFormat>(), Ok(format));
        }
        assert_eq!(ModelFormat::from_key("GLTF"), None);
        assert_eq!(
            "fbx2".parse::<ModelFormat>(),
            Err(UnknownFormat("fbx2".into()))
        );
    }

    #[test]
    fn dispatches_by_type() {
        let loader = loader();

        let scene = block_on(loader.load("models/a.gltf", &LoadOptions::of_type("gltf")));
        let obj = block_on(loader.load("models/b.obj", &LoadOptions::of_type("obj")));

        assert_eq!(
            scene,
            Some(Scene {
                url: "models/a.gltf".into(),
                format: "gltf"
            })
        );
        assert_eq!(obj.map(|scene| scene.format), Some("obj"));
    }

    #[test]
    fn missing_or_unknown_type_yields_none() {
        let loader = loader();

        assert_eq!(block_on(loader.load("a", &LoadOptions::default())), None);
        assert_eq!(block_on(loader.load("a", &LoadOptions::of_type("fbx"))), None);
        assert!(!loader.supports("fbx"));
    }

    #[test]
    fn loader_failure_is_none() {
        let loader = loader();

        assert_eq!(block_on(loader.load("", &LoadOptions::of_type("obj"))), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_use_type_field() {
        let options: LoadOptions =
            serde_json::from_str(r#"{"type":"stl","units":"mm"}"#).unwrap();

        assert_eq!(options, LoadOptions::of_type("stl").with("units", "mm"));
    }
}
