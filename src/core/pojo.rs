//! Export a fitted assembly as a generated Java POJO

use crate::client::{ApiRequest, ClientError, H2oConnection};
use crate::core::assembly::Assembly;
use crate::core::error::AssemblyError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Runtime archive needed to compile the generated POJO
pub const GENMODEL_JAR: &str = "h2o-genmodel.jar";

/// Options for `Assembly::to_pojo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PojoOptions {
    /// Class name; a random `AssemblyPOJO_<uuid>` when unset
    pub pojo_name: Option<String>,

    /// Directory to write into; the source is printed when unset
    pub path: Option<PathBuf>,

    /// Also download `h2o-genmodel.jar` next to the source (needs `path`)
    pub get_jar: bool,
}

impl Default for PojoOptions {
    fn default() -> Self {
        Self {
            pojo_name: None,
            path: None,
            get_jar: true,
        }
    }
}

impl PojoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.pojo_name = Some(name.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_jar(mut self, get_jar: bool) -> Self {
        self.get_jar = get_jar;
        self
    }
}

/// What `to_pojo` produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PojoExport {
    pub pojo_name: String,

    /// Size of the generated source in bytes
    pub source_len: usize,

    /// Written `.java` file, `None` when printed
    pub source_path: Option<PathBuf>,

    pub jar_path: Option<PathBuf>,
}

/// Default POJO class name
pub fn default_pojo_name() -> String {
    format!("AssemblyPOJO_{}", Uuid::new_v4().simple())
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), ClientError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })
}

impl Assembly {
    /// Generate the POJO for this assembly, printing it to stdout when no
    /// path is given
    pub async fn to_pojo(
        &self,
        conn: &H2oConnection,
        options: PojoOptions,
    ) -> Result<PojoExport, AssemblyError> {
        self.to_pojo_into(conn, options, &mut std::io::stdout()).await
    }

    /// Like `to_pojo`, but the source goes to `out` when no path is given
    ///
    /// The target directory is never created; a missing directory is
    /// reported as an I/O error.
    pub async fn to_pojo_into<W: Write + Send>(
        &self,
        conn: &H2oConnection,
        options: PojoOptions,
        out: &mut W,
    ) -> Result<PojoExport, AssemblyError> {
        let id = self.id().ok_or(AssemblyError::NotFitted)?;
        let pojo_name = options
            .pojo_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(default_pojo_name);

        let request = ApiRequest::parse("GET /99/Assembly.java")?
            .segment(id)
            .segment(&pojo_name);
        let java = conn.api_text(request).await?;
        debug!("Received {} bytes of POJO source for {}", java.len(), id);

        let mut export = PojoExport {
            pojo_name: pojo_name.clone(),
            source_len: java.len(),
            source_path: None,
            jar_path: None,
        };

        let Some(dir) = options.path else {
            writeln!(out, "{}", java)?;
            return Ok(export);
        };

        let source_path = dir.join(format!("{}.java", pojo_name));
        write_file(&source_path, java.as_bytes()).await?;
        info!("Wrote POJO source to {}", source_path.display());
        export.source_path = Some(source_path);

        if options.get_jar {
            let jar = conn.download(GENMODEL_JAR).await?;
            let jar_path = dir.join(GENMODEL_JAR);
            write_file(&jar_path, &jar).await?;
            info!("Wrote {} ({} bytes)", jar_path.display(), jar.len());
            export.jar_path = Some(jar_path);
        }

        Ok(export)
    }
}
