use crate::models::CacheInfo;

/// Two-line banner describing how the backend's caches served the last search.
pub fn render_cache_status(info: &CacheInfo) -> String {
    let mut flags = vec![
        format!("Vector: {}", hit_label(info.vector_cache_hit)),
        format!("Gemini: {}", hit_label(info.gemini_cache_hit)),
    ];
    if let Some(total) = info.total_batches.filter(|t| *t > 1) {
        flags.push(format!(
            "Batches: {}/{}",
            info.batches_processed.unwrap_or(0),
            total
        ));
    }

    let mut stats = format!(
        "{} resumes → {} filtered",
        info.total_resumes, info.filtered_resumes
    );
    if let Some(secs) = info.processing_time.filter(|s| *s > 0.0) {
        stats.push_str(&format!(" • {secs}s"));
        if info.total_resumes > 10 {
            stats.push_str(&format!(" ({:.1}/s)", info.total_resumes as f64 / secs));
        }
    }
    if !info.cache_key.is_empty() {
        let prefix: String = info.cache_key.chars().take(8).collect();
        stats.push_str(&format!(" • {prefix}..."));
    }

    format!("{}\n{}\n", flags.join(" | "), stats)
}

fn hit_label(hit: bool) -> &'static str {
    if hit {
        "Cached"
    } else {
        "Fresh"
    }
}
