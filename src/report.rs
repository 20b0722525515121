//! Result rendering for both binaries.

use std::io::Write;

use crate::compare::Comparison;
use crate::error::SimcheckResult;
use crate::validate::ValidationResult;

/// Write the validator's text report.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_validation<W: Write>(out: &mut W, result: &ValidationResult) -> std::io::Result<()> {
    writeln!(
        out,
        "[result] expect={} got={} mismatches={} => {}",
        result.expected_len,
        result.actual_len,
        result.mismatch_count,
        result.status.label()
    )?;

    if !result.examples.is_empty() {
        writeln!(out, " first mismatches (up to {}):", result.max_examples)?;
        for m in &result.examples {
            writeln!(
                out,
                "  idx {}: expect {} got {}",
                m.position,
                u8::from(m.expected),
                u8::from(m.actual)
            )?;
        }
    }

    if result.length_mismatch() {
        writeln!(out, " length mismatch between expect and got")?;
    }

    Ok(())
}

/// Write the validator's result as pretty JSON.
///
/// # Errors
///
/// Propagates serialization and write failures.
pub fn write_validation_json<W: Write>(
    out: &mut W,
    result: &ValidationResult,
) -> SimcheckResult<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out).map_err(serde_json::Error::io)?;
    Ok(())
}

/// Write the comparator's Hamming report. `expected` is the truth side.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_hamming<W: Write>(
    out: &mut W,
    cmp: &Comparison,
    max_show: usize,
) -> std::io::Result<()> {
    writeln!(out, "truth length      : {}", cmp.expected_len)?;
    writeln!(out, "pred length       : {}", cmp.actual_len)?;
    writeln!(out, "compared positions: {}", cmp.compared())?;
    writeln!(out, "hamming distance  : {}", cmp.hamming())?;
    writeln!(out, "accuracy          : {:.6}%", cmp.accuracy())?;

    if cmp.tail_diff() > 0 {
        writeln!(out, "length mismatch   : +{} treated as differences", cmp.tail_diff())?;
    }

    if !cmp.mismatches.is_empty() && max_show > 0 {
        let shown = cmp.mismatches.len().min(max_show);
        writeln!(out, "first {shown} mismatches (pos, truth, pred):")?;
        for m in &cmp.mismatches[..shown] {
            writeln!(
                out,
                "  {}: {} vs {}",
                m.position,
                u8::from(m.expected),
                u8::from(m.actual)
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Mismatch;
    use crate::validate::Status;

    fn result(expected_len: usize, actual_len: usize, examples: Vec<Mismatch>) -> ValidationResult {
        ValidationResult {
            status: if examples.is_empty() && expected_len == actual_len {
                Status::Pass
            } else {
                Status::Fail
            },
            maxdist: 3,
            sampled: false,
            db_words: 2,
            queries: expected_len,
            expected_len,
            actual_len,
            mismatch_count: examples.len(),
            examples,
            max_examples: 10,
        }
    }

    fn render(r: &ValidationResult) -> String {
        let mut buf = Vec::new();
        write_validation(&mut buf, r).expect("write to Vec should succeed");
        String::from_utf8(buf).expect("report should be UTF-8")
    }

    #[test]
    fn test_pass_report() {
        let text = render(&result(4, 4, Vec::new()));
        assert_eq!(text, "[result] expect=4 got=4 mismatches=0 => OK\n");
    }

    #[test]
    fn test_mismatch_report() {
        let text = render(&result(
            4,
            4,
            vec![Mismatch {
                position: 1,
                expected: false,
                actual: true,
            }],
        ));
        assert!(text.starts_with("[result] expect=4 got=4 mismatches=1 => NG\n"));
        assert!(text.contains("  idx 1: expect 0 got 1\n"));
        assert!(!text.contains("length mismatch"));
    }

    #[test]
    fn test_length_report() {
        let text = render(&result(4, 3, Vec::new()));
        assert!(text.contains("=> NG"));
        assert!(text.contains("length mismatch between expect and got"));
        assert!(!text.contains("first mismatches"));
    }

    #[test]
    fn test_json_report() {
        let mut buf = Vec::new();
        write_validation_json(&mut buf, &result(2, 2, Vec::new()))
            .expect("write to Vec should succeed");
        let value: serde_json::Value =
            serde_json::from_slice(&buf).expect("report should be valid JSON");
        assert_eq!(value["status"], "pass");
        assert_eq!(value["expected_len"], 2);
    }

    #[test]
    fn test_hamming_report() {
        let cmp = Comparison::new(&[true, false, true, false], &[true, true, true]);
        let mut buf = Vec::new();
        write_hamming(&mut buf, &cmp, 20).expect("write to Vec should succeed");
        let text = String::from_utf8(buf).expect("report should be UTF-8");
        assert!(text.contains("hamming distance  : 2\n"));
        assert!(text.contains("accuracy          : 50.000000%\n"));
        assert!(text.contains("length mismatch   : +1 treated as differences\n"));
        assert!(text.contains("  1: 0 vs 1\n"));
    }
}
