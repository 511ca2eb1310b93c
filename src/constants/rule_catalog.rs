use once_cell::sync::Lazy;
use regex::Regex;
use crate::enums::language::Language;
use crate::enums::severity::Severity;
use crate::enums::vulnerability_kind::VulnerabilityKind;

const PYTHON: &[Language] = &[Language::Python];
const JS: &[Language] = &[Language::Javascript, Language::Typescript];
const BASH: &[Language] = &[Language::Bash];
const GO: &[Language] = &[Language::Go];
const JAVA: &[Language] = &[Language::Java];
const JS_BASH: &[Language] = &[Language::Javascript, Language::Typescript, Language::Bash];
const ALL: &[Language] = &[
    Language::Python,
    Language::Javascript,
    Language::Typescript,
    Language::Bash,
    Language::Go,
    Language::Java,
];

/// How a rule finds candidate spans in source text.
pub enum Matcher {
    Literal(&'static str),
    Pattern(Regex),
    /// Structural check returning `(start, end)` byte spans.
    Heuristic(fn(&str) -> Vec<(usize, usize)>),
}

impl Matcher {
    pub fn spans(&self, content: &str) -> Vec<(usize, usize)> {
        match self {
            Matcher::Literal(needle) => content
                .match_indices(needle)
                .map(|(start, matched)| (start, start + matched.len()))
                .collect(),
            Matcher::Pattern(regex) => regex
                .find_iter(content)
                .map(|m| (m.start(), m.end()))
                .collect(),
            Matcher::Heuristic(check) => check(content),
        }
    }
}

pub struct RuleDefinition {
    pub id: &'static str,
    pub kind: VulnerabilityKind,
    pub languages: &'static [Language],
    pub matcher: Matcher,
    pub severity: Severity,
    /// `{match}` is replaced by the first line of the matched text.
    pub description: &'static str,
    /// Overrides the category's default CWE.
    pub cwe: Option<&'static str>,
    /// Whether findings carry a `line N` location.
    pub locate: bool,
}

impl RuleDefinition {
    pub fn applies_to(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }
}

fn pattern(source: &str) -> Matcher {
    Matcher::Pattern(Regex::new(source).expect("rule catalog pattern must compile"))
}

#[allow(clippy::too_many_arguments)]
fn rule(
    id: &'static str,
    kind: VulnerabilityKind,
    languages: &'static [Language],
    matcher: Matcher,
    severity: Severity,
    description: &'static str,
    cwe: Option<&'static str>,
) -> RuleDefinition {
    RuleDefinition { id, kind, languages, matcher, severity, description, cwe, locate: true }
}

/// Rules in tie-break order: for two matches starting at the same offset the
/// earlier rule wins, so stricter variants come before their general forms.
pub static RULE_CATALOG: Lazy<Vec<RuleDefinition>> = Lazy::new(|| {
    use VulnerabilityKind::*;

    vec![
        // SQL / command injection
        rule("py-os-system-interpolated", Injection, PYTHON,
            pattern(r#"os\.system\s*\(\s*(?:f["']|["'][^"'\n]*["']\s*[%+]|[^)\n]*\.format\s*\()"#),
            Severity::Critical, "Shell command built from interpolated input is passed to os.system(): {match}", Some("CWE-78")),
        rule("py-os-system", Injection, PYTHON,
            pattern(r"\bos\.(?:system|popen)\s*\("),
            Severity::High, "os.system()/os.popen() runs its argument through the shell: {match}", Some("CWE-78")),
        rule("py-subprocess-shell", Injection, PYTHON,
            pattern(r"subprocess\.(?:run|call|Popen|check_output|check_call)\s*\([^)]*shell\s*=\s*True"),
            Severity::High, "subprocess call with shell=True allows shell metacharacter injection", Some("CWE-78")),
        rule("py-sql-interpolated", Injection, PYTHON,
            pattern(r#"\.execute(?:many)?\s*\(\s*(?:f["']|["'][^"'\n]*["']\s*[%+]|[^)\n]*\.format\s*\()"#),
            Severity::Critical, "SQL statement built with string formatting: {match}", Some("CWE-89")),
        rule("py-eval", Injection, PYTHON,
            pattern(r"\b(?:eval|exec)\s*\("),
            Severity::High, "eval()/exec() executes dynamically constructed code: {match}", Some("CWE-95")),
        rule("js-child-process-interpolated", Injection, JS,
            pattern(r#"\b(?:exec|execSync|spawn|spawnSync)\s*\(\s*(?:`[^`]*\$\{|["'][^"'\n]*["']\s*\+)"#),
            Severity::Critical, "Shell command built from interpolated input is passed to child_process: {match}", Some("CWE-78")),
        rule("js-sql-interpolated", Injection, JS,
            pattern(r#"(?i)\.(?:query|execute|raw)\s*\(\s*(?:`[^`]*\$\{|["'][^"'\n]*\b(?:select|insert|update|delete)\b[^"'\n]*["']\s*\+)"#),
            Severity::Critical, "SQL statement built by string concatenation or template interpolation: {match}", Some("CWE-89")),
        rule("js-eval", Injection, JS,
            pattern(r"\beval\s*\(|\bnew\s+Function\s*\("),
            Severity::High, "eval()/new Function() executes dynamically constructed code: {match}", Some("CWE-95")),
        rule("sh-eval", Injection, BASH,
            pattern(r"(?m)^\s*eval\s+"),
            Severity::High, "eval re-parses its arguments as shell code", Some("CWE-78")),
        rule("sh-c-expansion", Injection, BASH,
            pattern(r#"\b(?:bash|sh)\s+-c\s+"[^"\n]*\$"#),
            Severity::High, "Command string with variable expansion passed to sh -c: {match}", Some("CWE-78")),
        rule("go-exec-shell", Injection, GO,
            pattern(r#"exec\.Command(?:Context)?\s*\([^)]*"(?:sh|bash)"\s*,\s*"-c""#),
            Severity::High, "exec.Command invokes a shell with -c", Some("CWE-78")),
        rule("go-sql-interpolated", Injection, GO,
            pattern(r#"\.(?:Query|QueryRow|Exec)(?:Context)?\s*\([^)\n]*?(?:fmt\.Sprintf\s*\(|"[^"\n]*"\s*\+)"#),
            Severity::Critical, "SQL statement built with fmt.Sprintf or concatenation: {match}", Some("CWE-89")),
        rule("java-runtime-exec", Injection, JAVA,
            pattern(r"Runtime\.getRuntime\(\)\s*\.exec\s*\(|\bnew\s+ProcessBuilder\s*\("),
            Severity::High, "Process spawned from Java code: {match}", Some("CWE-78")),
        rule("java-sql-concat", Injection, JAVA,
            pattern(r#"\.(?:executeQuery|executeUpdate|execute|prepareStatement)\s*\(\s*"[^"\n]*"\s*\+"#),
            Severity::Critical, "SQL statement built by string concatenation: {match}", Some("CWE-89")),

        // Cross-site scripting
        rule("js-inner-html", CrossSiteScripting, JS,
            pattern(r"\.(?:innerHTML|outerHTML)\s*=[^=]"),
            Severity::High, "Assignment to innerHTML/outerHTML renders unescaped markup: {match}", None),
        rule("js-dangerously-set-html", CrossSiteScripting, JS,
            Matcher::Literal("dangerouslySetInnerHTML"),
            Severity::Medium, "dangerouslySetInnerHTML bypasses React's output escaping", None),
        rule("js-document-write", CrossSiteScripting, JS,
            pattern(r"document\.write(?:ln)?\s*\("),
            Severity::Medium, "document.write() injects raw HTML into the page", None),
        rule("py-render-template-string", CrossSiteScripting, PYTHON,
            pattern(r"\brender_template_string\s*\("),
            Severity::High, "render_template_string() renders a template assembled at runtime", None),
        rule("py-markup-safe", CrossSiteScripting, PYTHON,
            pattern(r"\bMarkup\s*\(|\|\s*safe\b"),
            Severity::Medium, "Content marked safe skips autoescaping: {match}", None),
        rule("java-writer-parameter", CrossSiteScripting, JAVA,
            pattern(r"getWriter\(\)\s*\.\s*(?:print|println|write)\s*\([^;]*getParameter"),
            Severity::High, "Request parameter written straight to the HTTP response", None),
        rule("go-template-html", CrossSiteScripting, GO,
            pattern(r"template\.HTML\s*\("),
            Severity::Medium, "template.HTML() marks a string as trusted markup", None),

        // Hardcoded credentials
        rule("private-key-block", HardcodedCredentials, ALL,
            pattern(r"-----BEGIN (?:RSA |EC |DSA |OPENSSH )?PRIVATE KEY-----"),
            Severity::Critical, "Private key material embedded in source", Some("CWE-321")),
        rule("aws-access-key", HardcodedCredentials, ALL,
            pattern(r"\bAKIA[0-9A-Z]{16}\b"),
            Severity::Critical, "AWS access key ID embedded in source", None),
        rule("credential-literal", HardcodedCredentials, ALL,
            pattern(r#"(?i)\b[a-z_]*(?:password|passwd|secret|api_?key|access_?token|auth_?token|private_?key)[a-z_]*["']?(?:\s*:?=\s*|\s*:\s*)["'][^"'\s]{4,}["']"#),
            Severity::High, "Credential assigned from a string literal: {match}", None),

        // Path traversal
        rule("py-open-user-path", PathTraversal, PYTHON,
            pattern(r"\bopen\s*\([^)\n]*(?:request\.|input\s*\(|sys\.argv|\+\s*\w)"),
            Severity::High, "File opened with a path derived from external input: {match}", None),
        rule("py-send-file", PathTraversal, PYTHON,
            pattern(r"\bsend_file\s*\([^)\n]*request\."),
            Severity::High, "send_file() serves a path taken from the request", None),
        rule("js-fs-user-path", PathTraversal, JS,
            pattern(r"\b(?:readFile|readFileSync|createReadStream|writeFile|writeFileSync|sendFile|unlink)\s*\([^)\n]*(?:req\.(?:params|query|body)|\+\s*\w)"),
            Severity::High, "Filesystem call with a path derived from request data: {match}", None),
        rule("go-open-user-path", PathTraversal, GO,
            pattern(r"os\.(?:Open|OpenFile|ReadFile|Create)\s*\([^)\n]*(?:r\.URL|FormValue|\+\s*\w)"),
            Severity::High, "File opened with a path derived from external input: {match}", None),
        rule("java-file-user-path", PathTraversal, JAVA,
            pattern(r"new\s+File(?:InputStream|Reader)?\s*\([^)\n]*(?:getParameter|\+\s*\w)"),
            Severity::High, "File opened with a path derived from external input: {match}", None),

        // Insecure deserialization
        rule("py-pickle-load", InsecureDeserialization, PYTHON,
            pattern(r"\b(?:pickle|cPickle|dill|marshal)\.loads?\s*\("),
            Severity::High, "Deserializing with pickle/marshal can execute arbitrary code: {match}", None),
        rule("py-yaml-unsafe-load", InsecureDeserialization, PYTHON,
            Matcher::Heuristic(yaml_load_without_safe_loader),
            Severity::High, "yaml.load() without SafeLoader can construct arbitrary objects", None),
        rule("js-unserialize", InsecureDeserialization, JS,
            pattern(r#"\bunserialize\s*\(|require\s*\(\s*["']node-serialize["']\s*\)"#),
            Severity::High, "node-serialize style unserialize() evaluates embedded functions", None),
        rule("java-object-input-stream", InsecureDeserialization, JAVA,
            pattern(r"new\s+ObjectInputStream\s*\(|\.readObject\s*\(\s*\)|new\s+XMLDecoder\s*\("),
            Severity::High, "Native Java deserialization of untrusted data: {match}", None),

        // Weak cryptography
        rule("py-weak-hash", WeakCryptography, PYTHON,
            pattern(r#"hashlib\.(?:md5|sha1)\s*\(|hashlib\.new\s*\(\s*["'](?:md5|sha1)["']"#),
            Severity::Medium, "Broken hash algorithm in use: {match}", Some("CWE-328")),
        rule("py-weak-cipher", WeakCryptography, PYTHON,
            pattern(r"\b(?:DES|DES3|ARC4|Blowfish)\.new\s*\(|\bMODE_ECB\b"),
            Severity::High, "Weak cipher or ECB mode in use: {match}", None),
        rule("py-tls-verify-disabled", WeakCryptography, PYTHON,
            pattern(r"\bverify\s*=\s*False\b"),
            Severity::Medium, "TLS certificate verification disabled", Some("CWE-295")),
        rule("js-weak-hash", WeakCryptography, JS,
            pattern(r#"(?i)createHash\s*\(\s*["'](?:md5|sha1)["']"#),
            Severity::Medium, "Broken hash algorithm in use: {match}", Some("CWE-328")),
        rule("js-weak-cipher", WeakCryptography, JS,
            pattern(r#"(?i)\bcreateCipher\s*\(|createCipheriv\s*\(\s*["'](?:des|rc4|[a-z0-9-]*ecb)"#),
            Severity::High, "Deprecated or weak cipher in use: {match}", None),
        rule("tls-reject-unauthorized", WeakCryptography, JS_BASH,
            pattern(r#"rejectUnauthorized\s*:\s*false|NODE_TLS_REJECT_UNAUTHORIZED\s*=\s*["']?0"#),
            Severity::Medium, "TLS certificate verification disabled: {match}", Some("CWE-295")),
        rule("sh-curl-insecure", WeakCryptography, BASH,
            pattern(r"\bcurl\s[^\n]*(?:\s-k\b|--insecure)"),
            Severity::Medium, "curl invoked with TLS verification disabled", Some("CWE-295")),
        rule("go-weak-crypto-import", WeakCryptography, GO,
            pattern(r#""crypto/(?:md5|sha1|des|rc4)""#),
            Severity::Medium, "Weak cryptographic package imported: {match}", None),
        rule("go-insecure-skip-verify", WeakCryptography, GO,
            pattern(r"InsecureSkipVerify\s*:\s*true"),
            Severity::Medium, "TLS certificate verification disabled", Some("CWE-295")),
        rule("java-weak-hash", WeakCryptography, JAVA,
            pattern(r#"MessageDigest\.getInstance\s*\(\s*"(?:MD5|MD2|SHA-?1)""#),
            Severity::Medium, "Broken hash algorithm in use: {match}", Some("CWE-328")),
        rule("java-weak-cipher", WeakCryptography, JAVA,
            pattern(r#"Cipher\.getInstance\s*\(\s*"(?:DES|DESede|RC4|Blowfish|AES"|[A-Za-z0-9]+/ECB)"#),
            Severity::High, "Weak cipher or ECB mode in use: {match}", None),

        // Open redirect
        rule("py-redirect-request", OpenRedirect, PYTHON,
            pattern(r"\bredirect\s*\(\s*request\.(?:args|form|values|GET|POST)"),
            Severity::Medium, "Redirect target taken from request parameters", None),
        rule("js-redirect-request", OpenRedirect, JS,
            pattern(r"\.redirect\s*\(\s*(?:\d{3}\s*,\s*)?req\.(?:query|body|params)"),
            Severity::Medium, "Redirect target taken from request parameters", None),
        rule("js-location-from-url", OpenRedirect, JS,
            pattern(r"(?:window\.)?location(?:\.href)?\s*=\s*[^;\n]*(?:location\.(?:search|hash)|URLSearchParams|searchParams)"),
            Severity::Medium, "Browser navigation target taken from the current URL", None),
        rule("java-send-redirect", OpenRedirect, JAVA,
            pattern(r"sendRedirect\s*\([^)\n]*getParameter"),
            Severity::Medium, "Redirect target taken from request parameters", None),
        rule("go-http-redirect", OpenRedirect, GO,
            pattern(r"http\.Redirect\s*\([^)\n]*(?:r\.URL\.Query|FormValue)"),
            Severity::Medium, "Redirect target taken from request parameters", None),

        // Insufficient input validation
        rule("py-unvalidated-input", InsufficientInputValidation, PYTHON,
            Matcher::Heuristic(unvalidated_python_input),
            Severity::Low, "External input is used without any visible validation", None),
        rule("js-unvalidated-input", InsufficientInputValidation, JS,
            Matcher::Heuristic(unvalidated_js_input),
            Severity::Low, "Request data is used without any visible validation", None),
        rule("go-unvalidated-input", InsufficientInputValidation, GO,
            Matcher::Heuristic(unvalidated_go_input),
            Severity::Low, "Request data is used without any visible validation", None),
        rule("java-unvalidated-input", InsufficientInputValidation, JAVA,
            Matcher::Heuristic(unvalidated_java_input),
            Severity::Low, "Request data is used without any visible validation", None),
        rule("sh-unvalidated-input", InsufficientInputValidation, BASH,
            Matcher::Heuristic(unvalidated_bash_input),
            Severity::Low, "Script arguments are used without any visible validation", None),

        // Insecure randomness
        rule("py-random-security-context", InsecureRandomness, PYTHON,
            pattern(r"(?i)(?:token|password|secret|session|otp|salt|nonce|key)[^\n]*\brandom\.(?:random|randint|choice|choices|randrange|getrandbits)\s*\("),
            Severity::Medium, "Predictable random module used for a security value: {match}", None),
        rule("py-random", InsecureRandomness, PYTHON,
            pattern(r"\brandom\.(?:random|randint|choice|choices|randrange|getrandbits)\s*\("),
            Severity::Low, "random module is not cryptographically secure", None),
        rule("js-math-random-security-context", InsecureRandomness, JS,
            pattern(r"(?i)(?:token|password|secret|session|otp|salt|nonce|key)[^\n]*Math\.random\s*\("),
            Severity::Medium, "Math.random() used for a security value: {match}", None),
        rule("js-math-random", InsecureRandomness, JS,
            pattern(r"Math\.random\s*\("),
            Severity::Low, "Math.random() is not cryptographically secure", None),
        rule("java-random-security-context", InsecureRandomness, JAVA,
            pattern(r"(?i)(?:token|password|secret|session|otp|salt|nonce|key)[^\n]*new\s+(?:java\.util\.)?Random\s*\("),
            Severity::Medium, "java.util.Random used for a security value: {match}", None),
        rule("java-random", InsecureRandomness, JAVA,
            pattern(r"\bnew\s+(?:java\.util\.)?Random\s*\("),
            Severity::Low, "java.util.Random is not cryptographically secure", None),
        rule("go-math-rand", InsecureRandomness, GO,
            Matcher::Literal("\"math/rand\""),
            Severity::Low, "math/rand is not cryptographically secure", None),
        rule("sh-random", InsecureRandomness, BASH,
            Matcher::Literal("$RANDOM"),
            Severity::Low, "$RANDOM is not cryptographically secure", None),

        // Server-side request forgery
        rule("py-ssrf", ServerSideRequestForgery, PYTHON,
            pattern(r"\b(?:requests|httpx)\.(?:get|post|put|patch|delete|head|request)\s*\([^)\n]*request\.(?:args|form|json|values|GET|POST)|\burlopen\s*\([^)\n]*request\."),
            Severity::High, "Outbound request to a URL taken from the incoming request: {match}", None),
        rule("js-ssrf", ServerSideRequestForgery, JS,
            pattern(r"\b(?:fetch|axios(?:\.(?:get|post|put|delete|request))?|got|https?\.get)\s*\(\s*(?:`[^`]*\$\{\s*)?req\.(?:query|body|params)"),
            Severity::High, "Outbound request to a URL taken from the incoming request: {match}", None),
        rule("go-ssrf", ServerSideRequestForgery, GO,
            pattern(r"http\.(?:Get|Post|Head)\s*\([^)\n]*(?:r\.URL\.Query|FormValue)"),
            Severity::High, "Outbound request to a URL taken from the incoming request: {match}", None),
        rule("java-ssrf", ServerSideRequestForgery, JAVA,
            pattern(r"new\s+URL\s*\([^)\n]*getParameter"),
            Severity::High, "Outbound request to a URL taken from the incoming request: {match}", None),
    ]
});

fn yaml_load_without_safe_loader(content: &str) -> Vec<(usize, usize)> {
    content
        .match_indices("yaml.load(")
        .filter(|(start, _)| {
            let line_end = content[*start..].find('\n').map_or(content.len(), |offset| start + offset);
            !content[*start..line_end].contains("SafeLoader")
        })
        .map(|(start, matched)| (start, start + matched.len()))
        .collect()
}

const VALIDATION_MARKERS: &[&str] = &[
    "validat", "sanitiz", "isinstance", "schema", "re.match", "re.fullmatch", "allowlist",
    "whitelist", "Pattern.compile", "regexp.MustCompile", ".test(", "=~", "strconv.Atoi", "Joi.",
    "zod", "escape(",
];

/// First external-input source, reported only when the file shows no validation at all.
fn first_unvalidated_source(content: &str, sources: &[&str]) -> Vec<(usize, usize)> {
    let lowered = content.to_lowercase();
    if VALIDATION_MARKERS.iter().any(|marker| lowered.contains(&marker.to_lowercase())) {
        return Vec::new();
    }

    sources
        .iter()
        .filter_map(|source| content.find(source).map(|start| (start, start + source.len())))
        .min_by_key(|(start, _)| *start)
        .into_iter()
        .collect()
}

fn unvalidated_python_input(content: &str) -> Vec<(usize, usize)> {
    first_unvalidated_source(content, &["input(", "request.args", "request.form", "request.json", "sys.argv"])
}

fn unvalidated_js_input(content: &str) -> Vec<(usize, usize)> {
    first_unvalidated_source(content, &["req.query", "req.body", "req.params", "process.argv"])
}

fn unvalidated_go_input(content: &str) -> Vec<(usize, usize)> {
    first_unvalidated_source(content, &["r.URL.Query()", "r.FormValue(", "os.Args"])
}

fn unvalidated_java_input(content: &str) -> Vec<(usize, usize)> {
    first_unvalidated_source(content, &["getParameter(", "new Scanner(System.in)"])
}

fn unvalidated_bash_input(content: &str) -> Vec<(usize, usize)> {
    first_unvalidated_source(content, &["read -r ", "read ", "$1"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_compiles_with_unique_ids() {
        let ids: HashSet<_> = RULE_CATALOG.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), RULE_CATALOG.len());
    }

    #[test]
    fn test_catalog_covers_every_static_category() {
        let kinds: HashSet<_> = RULE_CATALOG.iter().map(|r| r.kind).collect();
        for kind in &VulnerabilityKind::ALL[..10] {
            assert!(kinds.contains(kind), "no rule for {}", kind);
        }
    }

    #[test]
    fn test_yaml_heuristic_respects_safe_loader() {
        let unsafe_load = "data = yaml.load(stream)\n";
        let safe_load = "data = yaml.load(stream, Loader=yaml.SafeLoader)\n";
        assert_eq!(yaml_load_without_safe_loader(unsafe_load).len(), 1);
        assert!(yaml_load_without_safe_loader(safe_load).is_empty());
    }

    #[test]
    fn test_input_heuristic_is_silenced_by_validation() {
        let raw = "name = request.args.get('name')\n";
        let validated = "name = request.args.get('name')\nif not re.fullmatch(r'\\w+', name): abort(400)\n";
        assert_eq!(unvalidated_python_input(raw), vec![(7, 19)]);
        assert!(unvalidated_python_input(validated).is_empty());
    }
}
