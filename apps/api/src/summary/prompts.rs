/// Summary prompt. Both inputs are inserted verbatim in a single pass.
pub fn summary_prompt(job_role: &str, info: &str) -> String {
    format!(
        "Write a professional ATS friendly summary under 800 characters for a {job_role} role \
         considering the following job role information and information about me: {info}"
    )
}
