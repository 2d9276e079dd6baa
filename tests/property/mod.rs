mod backoff;
mod retry;
