use std::io::Write;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::{
    blob::{to_blob, Blob, BlobSource},
    encode::{to_c_array, to_ds_hex_literal},
    header::ModelBlob,
};

/// resolves the source, encodes it and writes the three labeled sections to
/// out. Nothing is written if the source is invalid.
pub fn run<W: Write>(source: Option<BlobSource>, out: &mut W) -> Result<()> {
    let blob = to_blob(source)?;
    inspect(&blob);

    let c_array = to_c_array(&blob);
    let ds_hex = to_ds_hex_literal(&blob);

    writeln!(out, "Blob: {}", blob).context("failed to write blob")?;
    writeln!(out, "\nC code:\n{}", c_array).context("failed to write C code")?;
    writeln!(out, "DeviceScript:\n{}", ds_hex).context("failed to write DeviceScript")?;
    out.flush()?;

    Ok(())
}

/// logs what the blob holds, if it carries a model header
fn inspect(blob: &Blob) {
    info!("encoding blob of {} bytes", blob.len());

    match ModelBlob::parse(blob) {
        Ok(model_blob) => {
            info!("model header: {}", model_blob.header);
            debug!("ML4F model: {} bytes", model_blob.model.len());
        }
        Err(err) => warn!("blob does not start with a valid model header: {}", err),
    }
}
