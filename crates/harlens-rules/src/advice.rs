use crate::finding::RuleId;

/// Static remediation text attached to every finding of a rule
pub struct Advice {
    pub suggestion: &'static str,
    pub context: &'static str,
    pub next_steps: &'static [&'static str],
}

pub fn for_rule(rule_id: RuleId) -> &'static Advice {
    match rule_id {
        RuleId::SlowTtfb => &SLOW_TTFB,
        RuleId::LargePayload => &LARGE_PAYLOAD,
        RuleId::ServerError => &SERVER_ERROR,
        RuleId::ClientError => &CLIENT_ERROR,
        RuleId::RedirectChain => &REDIRECT_CHAIN,
        RuleId::HighConnectTime => &HIGH_CONNECT_TIME,
        RuleId::HighDnsTime => &HIGH_DNS_TIME,
    }
}

static SLOW_TTFB: Advice = Advice {
    suggestion: "High TTFB usually points at backend slowness, cold starts, or overloaded compute.",
    context: "Long server-side execution, slow or unindexed database queries, lock contention \
              during large commits, and cold containers after a scale-up all show up here.",
    next_steps: &[
        "Check server execution time in application logs",
        "Inspect query plans for the endpoint",
        "Compare against host CPU and saturation metrics",
    ],
};

static LARGE_PAYLOAD: Advice = Advice {
    suggestion: "Compress or lazy-load large assets to improve initial load time.",
    context: "Typical causes are unfiltered list endpoints returning full records, \
              components fetching more fields than they render, and uncompressed static bundles.",
    next_steps: &[
        "Inspect the payload in the browser network panel",
        "Confirm gzip or brotli is applied to the response",
        "Audit the client for lazy-loading opportunities",
    ],
};

static SERVER_ERROR: Advice = Advice {
    suggestion: "Server-side failure: application crash, dependency timeout, or overload.",
    context: "Unhandled exceptions, timeouts in chained downstream calls, and \
              infrastructure faults behind the load balancer all surface as 5xx.",
    next_steps: &[
        "Review server logs and exception traces for the request time",
        "Check downstream service health",
        "Review recent deployments and configuration changes",
    ],
};

static CLIENT_ERROR: Advice = Advice {
    suggestion: "Client-side issue: malformed request, missing auth token, or bad URL.",
    context: "Expired session tokens, a wrong API version in the path, missing \
              Authorization headers, and CORS preflight rejections are the usual suspects.",
    next_steps: &[
        "Re-authenticate and retry",
        "Verify the endpoint path and required headers",
        "Check the browser console for CORS or redirect errors",
    ],
};

static REDIRECT_CHAIN: Advice = Advice {
    suggestion: "Redirects cost a round trip each. Reduce hops or cache the final location.",
    context: "Login bounces through an identity provider, http to https upgrades, and \
              custom-domain rewrites commonly stack several redirects.",
    next_steps: &[
        "Trace the redirect chain in the browser network panel",
        "Review domain and routing configuration",
        "Retest in a private window or with a different auth flow",
    ],
};

static HIGH_CONNECT_TIME: Advice = Advice {
    suggestion: "Poor client network or proxy interference. Check endpoint proximity and routing.",
    context: "Clients far from the serving region, corporate proxies, VPNs, and strict \
              firewalls inflate TCP and TLS setup time.",
    next_steps: &[
        "Compare connect times across regions and client IPs",
        "Retest without VPN or proxy",
    ],
};

static HIGH_DNS_TIME: Advice = Advice {
    suggestion: "Slow DNS resolution, often from custom resolvers or misrouted traffic.",
    context: "Stale records for custom domains, low-TTL vanity hostnames, and regional \
              failover can all slow name resolution.",
    next_steps: &[
        "Flush the DNS cache and retry",
        "Verify record TTLs and propagation",
        "Compare with resolution of the provider's default hostname",
    ],
};
