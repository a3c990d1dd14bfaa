use portfolio_core::{ElementHandle, Preference, RevealPolicy};

/// DOM id given to an element watched for reveal.
#[must_use]
pub fn reveal_dom_id(handle: ElementHandle) -> String {
    format!("reveal-target-{handle}")
}

/// Reports every media query in one initial message, then each change on
/// its own. Every message is an array of `{ key, value }`; the initial one is
/// empty when the page cannot evaluate media queries.
pub(super) fn media_query_bridge_script() -> String {
    let queries = Preference::ALL
        .iter()
        .map(|pref| format!("[{:?}, {:?}]", pref.key(), pref.media_query()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"(function() {{
                    const state = window.__portfolioMedia || (window.__portfolioMedia = {{ disposers: [] }});
                    state.disposers.forEach((dispose) => dispose());
                    state.disposers = [];
                    if (!window.matchMedia) {{
                        dioxus.send([]);
                        return;
                    }}
                    const queries = [{queries}].map(([key, query]) => [key, window.matchMedia(query)]);
                    dioxus.send(queries.map(([key, mql]) => ({{ key, value: mql.matches }})));
                    for (const [key, mql] of queries) {{
                        const onChange = (event) => dioxus.send([{{ key, value: event.matches }}]);
                        mql.addEventListener("change", onChange);
                        state.disposers.push(() => mql.removeEventListener("change", onChange));
                    }}
                }})();"#,
        queries = queries,
    )
}

pub(super) const MEDIA_QUERY_TEARDOWN_SCRIPT: &str = r#"(function() {
                    const state = window.__portfolioMedia;
                    if (!state) { return; }
                    state.disposers.forEach((dispose) => dispose());
                    state.disposers = [];
                })();"#;

/// Creates one `IntersectionObserver` for `policy` and serves
/// `observe` / `unobserve` / `disconnect` commands. Each observer callback is
/// sent back as one batch of `{ element, ratio, is_intersecting }`.
pub(super) fn reveal_bridge_script(policy: &RevealPolicy) -> String {
    format!(
        r#"
                    const previous = window.__portfolioReveal;
                    if (previous) {{
                        previous.observer.disconnect();
                        previous.targets.clear();
                    }}
                    const targets = new Map();
                    const observer = new IntersectionObserver((entries) => {{
                        const batch = [];
                        for (const entry of entries) {{
                            const element = targets.get(entry.target);
                            if (element === undefined) {{ continue; }}
                            batch.push({{
                                element,
                                ratio: entry.intersectionRatio,
                                is_intersecting: entry.isIntersecting,
                            }});
                        }}
                        if (batch.length > 0) {{
                            dioxus.send(batch);
                        }}
                    }}, {{ threshold: {threshold}, rootMargin: {root_margin:?} }});
                    window.__portfolioReveal = {{ observer, targets }};
                    while (true) {{
                        const command = await dioxus.recv();
                        if (command.op === "observe") {{
                            const el = document.getElementById(command.dom_id);
                            if (!el) {{ continue; }}
                            targets.set(el, command.element);
                            observer.observe(el);
                        }} else if (command.op === "unobserve") {{
                            for (const [el, element] of targets) {{
                                if (element === command.element) {{
                                    observer.unobserve(el);
                                    targets.delete(el);
                                }}
                            }}
                        }} else if (command.op === "disconnect") {{
                            observer.disconnect();
                            targets.clear();
                            break;
                        }}
                    }}
                "#,
        threshold = policy.threshold,
        root_margin = policy.root_margin(),
    )
}

pub(super) const REVEAL_TEARDOWN_SCRIPT: &str = r#"(function() {
                    const state = window.__portfolioReveal;
                    if (!state) { return; }
                    state.observer.disconnect();
                    state.targets.clear();
                    window.__portfolioReveal = null;
                })();"#;
