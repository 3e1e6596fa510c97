// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cardclip::error::PipelineError;
use cardclip::extract::extract_text;

// Sole test in this binary, so the TMPDIR override cannot race another test.
#[test]
fn scratch_file_failure_surfaces_as_extract_stage() {
    unsafe { std::env::set_var("TMPDIR", "/nonexistent-cardclip-scratch") };
    let err = extract_text(b"%PDF-1.4", None).unwrap_err();
    unsafe { std::env::remove_var("TMPDIR") };

    assert!(matches!(err, PipelineError::Extract(_)));
    assert!(err.to_string().contains("scratch file"));
}
